use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::photos::Photo;

/// Formats the one-line description shown under a photo title.
#[derive(Debug, Clone)]
pub struct PhotoDescriptionFormatter {
    date_format: String,
}

impl PhotoDescriptionFormatter {
    /// `date_format` is a chrono strftime pattern.
    pub fn new(date_format: impl Into<String>) -> Self {
        Self {
            date_format: date_format.into(),
        }
    }

    /// `photographer | date`, or whichever of the two is present.
    pub fn describe(&self, photographer: Option<&str>, date: Option<&DateTime<Utc>>) -> String {
        let date = date.map(|d| self.format_date(d));
        match (photographer, date) {
            (Some(photographer), Some(date)) => format!("{photographer} | {date}"),
            (Some(photographer), None) => photographer.to_string(),
            (None, Some(date)) => date,
            (None, None) => String::new(),
        }
    }

    pub fn describe_photo(&self, photo: &Photo) -> String {
        self.describe(photo.photographer.as_deref(), photo.date_created.as_ref())
    }

    fn format_date(&self, date: &DateTime<Utc>) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.date_format)).is_err() {
            return date.to_rfc3339();
        }
        out
    }
}
