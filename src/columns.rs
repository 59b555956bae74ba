//! Column names of the trip files and of the columns derived at load time.

pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

/// Calendar month (1–12) of `Start Time`.
pub const MONTH: &str = "month";
/// Weekday name (`"Monday"`) of `Start Time`.
pub const DAY_OF_WEEK: &str = "day_of_week";
