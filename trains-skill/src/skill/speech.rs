//! What the skill says.

use chrono::NaiveDateTime;

use crate::domain::{IndirectRoute, Train};

pub const HELP_MESSAGE: &str =
    "I can help you find a New Jersey Transit train to your desired destination";
pub const HELP_REPROMPT: &str = "What can I help you with?";
pub const STOP_MESSAGE: &str = "Goodbye!";
pub const FALLBACK_MESSAGE: &str =
    "The Jersey Trains skill can help you find New Jersey Transit trains to your desired destination";
pub const NO_HOME_STATION_SET: &str = "Sorry, no home station has been set. You can set your home \
     station by saying ask Jersey Trains to set my home station to a station name";
pub const ERROR_NO_STATION: &str = "I'm sorry, you must specify a station";
pub const DESTINATION_SAME_AS_HOME: &str =
    "Your destination is the same as your home station, you are already there";
pub const PROBLEM_WITH_ROUTE: &str = "Sorry, there was a problem finding a route to your destination";

pub fn home_station_set(station: &str) -> String {
    format!("Your home station has been set to {station}")
}

pub fn cannot_set_home(station: &str) -> String {
    format!("Sorry, I cannot set {station} as your home station")
}

pub fn current_home_station(station: &str) -> String {
    format!("Your current home station is {station}")
}

pub fn destination_invalid(station: &str) -> String {
    format!("Sorry, {station} is not a New Jersey Transit station")
}

pub fn no_route(start: &str, destination: &str) -> String {
    format!("Sorry, I could not find a train from {start} to {destination} right now")
}

/// Clock time as spoken: `1:00 AM`, `3:05 PM`, `12:10 PM`.
pub fn format_speech_time(time: NaiveDateTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Escape text for inclusion in SSML.
pub fn escape_ssml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Sentence for a direct train, or `None` if it lacks either stop.
pub fn direct_sentence(start: &str, destination: &str, train: &Train) -> Option<String> {
    let leave = train.time_at(start)?;
    let arrive = train.time_at(destination)?;
    Some(format!(
        "The next train from {} to {} will leave at {} and arrive at {}",
        escape_ssml(start),
        escape_ssml(destination),
        format_speech_time(leave),
        format_speech_time(arrive),
    ))
}

/// Sentence for a one-change route, or `None` if a needed stop is missing.
pub fn indirect_sentence(start: &str, destination: &str, route: &IndirectRoute) -> Option<String> {
    let leave = route.start.time_at(start)?;
    let change = route.departs_transfer()?;
    let arrive = route.transfer.time_at(destination)?;
    Some(format!(
        "The next train from {} to {} will leave at {} with a transfer at {}, \
         departing at {}, and arrive at {}",
        escape_ssml(start),
        escape_ssml(destination),
        format_speech_time(leave),
        escape_ssml(&route.station),
        format_speech_time(change),
        format_speech_time(arrive),
    ))
}
