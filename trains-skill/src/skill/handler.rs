//! Request dispatch for the voice skill.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::{BestRoute, to_network_time};
use crate::home::HomeStoreError;
use crate::planner::{PlanError, ScheduleProvider};
use crate::stations::StationDirectory;

use super::dto::{Intent, SkillRequest, SkillResponse};
use super::speech::{
    DESTINATION_SAME_AS_HOME, ERROR_NO_STATION, FALLBACK_MESSAGE, HELP_MESSAGE, HELP_REPROMPT,
    NO_HOME_STATION_SET, PROBLEM_WITH_ROUTE, STOP_MESSAGE, cannot_set_home, current_home_station,
    destination_invalid, direct_sentence, home_station_set, indirect_sentence, no_route,
};
use super::state::AppState;

/// Slot carrying a spoken station name.
pub const STATION_SLOT: &str = "station";

/// Errors that prevent the skill from answering at all.
#[derive(Debug, thiserror::Error)]
pub enum SkillError {
    /// Request needs a user id but the session carries none
    #[error("request has no user id")]
    MissingUser,

    #[error(transparent)]
    HomeStore(#[from] HomeStoreError),
}

/// Answer one skill request.
///
/// Returns `None` for requests the platform expects no speech for.
pub async fn handle<P>(
    state: &AppState<P>,
    request: SkillRequest,
) -> Result<Option<SkillResponse>, SkillError>
where
    P: ScheduleProvider + Sync,
{
    if request.session.as_ref().is_some_and(|s| s.new) {
        debug!(user_id = request.user_id(), "session started");
    }

    match request.request.kind.as_str() {
        "LaunchRequest" => Ok(Some(help())),
        "IntentRequest" => match &request.request.intent {
            Some(intent) => handle_intent(state, &request, intent).await.map(Some),
            None => {
                debug!("intent request without intent");
                Ok(Some(help()))
            }
        },
        "SessionEndedRequest" => {
            debug!(user_id = request.user_id(), "session ended");
            Ok(None)
        }
        other => {
            debug!(kind = other, "ignoring request type");
            Ok(None)
        }
    }
}

async fn handle_intent<P>(
    state: &AppState<P>,
    request: &SkillRequest,
    intent: &Intent,
) -> Result<SkillResponse, SkillError>
where
    P: ScheduleProvider + Sync,
{
    info!(intent = %intent.name, "handling intent");

    match intent.name.as_str() {
        "AMAZON.HelpIntent" => Ok(help()),
        "AMAZON.StopIntent" | "AMAZON.CancelIntent" => Ok(SkillResponse::plain(STOP_MESSAGE, true)),
        "AMAZON.FallbackIntent" => Ok(SkillResponse::plain(FALLBACK_MESSAGE, true)),
        "SetHome" => set_home(state, user(request)?, intent).await,
        "GetHome" => get_home(state, user(request)?).await,
        "NextTrain" => next_train(state, request, intent).await,
        other => {
            debug!(intent = other, "unknown intent, offering help");
            Ok(help())
        }
    }
}

fn help() -> SkillResponse {
    SkillResponse::prompt(HELP_MESSAGE, HELP_REPROMPT, false)
}

fn user(request: &SkillRequest) -> Result<&str, SkillError> {
    request.user_id().ok_or(SkillError::MissingUser)
}

async fn set_home<P>(
    state: &AppState<P>,
    user_id: &str,
    intent: &Intent,
) -> Result<SkillResponse, SkillError>
where
    P: ScheduleProvider + Sync,
{
    let Some(spoken) = intent.slot_value(STATION_SLOT) else {
        return Ok(SkillResponse::plain(ERROR_NO_STATION, true));
    };
    let Some((_, name)) = state.stations().resolve(spoken) else {
        return Ok(SkillResponse::plain(cannot_set_home(spoken), true));
    };

    state.homes.set(user_id, name).await?;
    Ok(SkillResponse::plain(home_station_set(name), true))
}

async fn get_home<P>(state: &AppState<P>, user_id: &str) -> Result<SkillResponse, SkillError> {
    let speech = match state.homes.get(user_id).await {
        Some(home) => current_home_station(&home),
        None => NO_HOME_STATION_SET.to_string(),
    };
    Ok(SkillResponse::plain(speech, true))
}

async fn next_train<P>(
    state: &AppState<P>,
    request: &SkillRequest,
    intent: &Intent,
) -> Result<SkillResponse, SkillError>
where
    P: ScheduleProvider + Sync,
{
    let user_id = user(request)?;
    let Some(home) = state.homes.get(user_id).await else {
        return Ok(SkillResponse::plain(NO_HOME_STATION_SET, true));
    };
    let Some(spoken) = intent.slot_value(STATION_SLOT) else {
        return Ok(SkillResponse::plain(ERROR_NO_STATION, true));
    };

    let stations = state.stations();
    let Some((destination_code, destination)) = stations.resolve(spoken) else {
        return Ok(SkillResponse::plain(destination_invalid(spoken), true));
    };
    if destination == home {
        return Ok(SkillResponse::plain(DESTINATION_SAME_AS_HOME, true));
    }
    let Some(home_code) = stations.abbreviation_for(&home) else {
        warn!(user_id, home = %home, "stored home station is no longer known");
        return Ok(SkillResponse::plain(PROBLEM_WITH_ROUTE, true));
    };

    let departure = to_network_time(request_instant(request.request.timestamp.as_deref()));
    let routes = match state
        .engine
        .compute_routes(home_code.as_str(), destination_code.as_str(), departure)
        .await
    {
        Ok(routes) => routes,
        Err(PlanError::SameStation) => {
            return Ok(SkillResponse::plain(DESTINATION_SAME_AS_HOME, true));
        }
        Err(e @ PlanError::InvalidStation(_)) => {
            warn!(error = %e, "route computation rejected stations");
            return Ok(SkillResponse::plain(PROBLEM_WITH_ROUTE, true));
        }
    };

    let sentence = match state.engine.select_best(&home, destination, &routes) {
        BestRoute::Direct(train) => direct_sentence(&home, destination, &train),
        BestRoute::Indirect(route) => indirect_sentence(&home, destination, &route),
        BestRoute::None => {
            return Ok(SkillResponse::plain(no_route(&home, destination), true));
        }
    };

    match sentence {
        Some(sentence) => Ok(SkillResponse::ssml(&sentence, true)),
        None => Ok(SkillResponse::plain(PROBLEM_WITH_ROUTE, true)),
    }
}

/// When the request was made; the current time if absent or unreadable.
fn request_instant(timestamp: Option<&str>) -> DateTime<Utc> {
    match timestamp.map(DateTime::parse_from_rfc3339) {
        Some(Ok(instant)) => instant.with_timezone(&Utc),
        Some(Err(e)) => {
            warn!(error = %e, "unreadable request timestamp, using current time");
            Utc::now()
        }
        None => Utc::now(),
    }
}
