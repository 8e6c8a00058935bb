/// Date helpers for windows and feed entries
pub mod time {
    use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

    /// Midnight UTC at the start of `date`
    pub fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
        date.and_time(NaiveTime::MIN).and_utc()
    }

    /// `2023-03-10T00:00:00.000Z`
    pub fn iso_timestamp(date: NaiveDate) -> String {
        midnight_utc(date).format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
    }

    /// `3/4/2023`
    pub fn human_date(date: NaiveDate) -> String {
        date.format("%-m/%-d/%Y").to_string()
    }

    pub fn parse_date(value: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
    }
}

/// Text escaping for feed content
pub mod html {
    use quick_xml::escape::escape as xml_escape;

    /// Escapes `& < > " '` so user text can sit inside HTML.
    pub fn escape(text: &str) -> String {
        xml_escape(text).into_owned()
    }
}

/// URL utilities
pub mod url {
    use url::Url;

    /// Appends `path` to `base` without dropping any path prefix on the base.
    pub fn join_path(base: &str, path: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    /// Validate a site or API base URL
    pub fn is_valid_base_url(url_str: &str) -> bool {
        if let Ok(url) = Url::parse(url_str) {
            url.scheme() == "http" || url.scheme() == "https"
        } else {
            false
        }
    }
}
