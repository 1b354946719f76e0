use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{Error, Unexpected},
};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};
use thiserror::Error;
use time::{Date, UtcDateTime, format_description::BorrowedFormatItem, macros::format_description};

const POST_DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Calendar date of a post, written as `YYYY-MM-DD` on the wire and on disk.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct PostDate(Date);

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("The date is not of the form YYYY-MM-DD: {0}")]
pub struct InvalidPostDateError(String);

impl PostDate {
    #[must_use]
    pub fn new(date: Date) -> Self {
        Self(date)
    }

    #[must_use]
    pub fn today() -> Self {
        Self(UtcDateTime::now().date())
    }

    #[must_use]
    pub fn get(self) -> Date {
        self.0
    }
}

impl From<Date> for PostDate {
    fn from(value: Date) -> Self {
        Self::new(value)
    }
}

impl FromStr for PostDate {
    type Err = InvalidPostDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Date::parse(s, POST_DATE_FORMAT)
            .map(Self)
            .map_err(|_| InvalidPostDateError(s.to_owned()))
    }
}

impl Display for PostDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let formatted = self
            .0
            .format(POST_DATE_FORMAT)
            .map_err(|_| std::fmt::Error)?;
        f.write_str(&formatted)
    }
}

impl Serialize for PostDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PostDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let inner = String::deserialize(deserializer)?;
        PostDate::from_str(&inner)
            .map_err(|err| Error::invalid_value(Unexpected::Str(&err.0), &"YYYY-MM-DD"))
    }
}
