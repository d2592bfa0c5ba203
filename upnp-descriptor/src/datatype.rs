//! Builtin UPnP datatypes.
//!
//! A state variable declares one of these in its `<dataType>` element. Lookup
//! by descriptor name is case-insensitive; anything outside the closed set
//! is an [`UnknownDatatype`].

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// The descriptor name did not name a builtin datatype.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown datatype: '{0}'")]
pub struct UnknownDatatype(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum Datatype {
    /// Unsigned 8-bit integer
    Ui1,
    /// Unsigned 16-bit integer
    Ui2,
    /// Unsigned 32-bit integer
    Ui4,
    /// Signed 8-bit integer
    I1,
    /// Signed 16-bit integer
    I2,
    /// Signed 32-bit integer
    I4,
    /// Synonym for i4
    Int,
    /// 32-bit float
    R4,
    /// 64-bit float
    R8,
    /// Synonym for r8
    Number,
    /// At most 14 digits left of the decimal point and 4 right of it
    Fixed14_4,
    /// Synonym for r8
    Float,
    /// One Unicode character
    Char,
    String,
    /// `YYYY-MM-DD`
    Date,
    /// Date with an optional time, no time zone
    DateTime,
    /// Date with an optional time and time zone
    DateTimeTz,
    /// `hh:mm:ss`, no time zone
    Time,
    /// Time with an optional time zone
    TimeTz,
    /// `0`, `1`, `true`, `false`, `yes` or `no`
    Boolean,
    BinBase64,
    BinHex,
    Uri,
    Uuid,
}

impl Datatype {
    /// Every builtin datatype, in declaration order.
    pub const ALL: [Datatype; 24] = [
        Datatype::Ui1,
        Datatype::Ui2,
        Datatype::Ui4,
        Datatype::I1,
        Datatype::I2,
        Datatype::I4,
        Datatype::Int,
        Datatype::R4,
        Datatype::R8,
        Datatype::Number,
        Datatype::Fixed14_4,
        Datatype::Float,
        Datatype::Char,
        Datatype::String,
        Datatype::Date,
        Datatype::DateTime,
        Datatype::DateTimeTz,
        Datatype::Time,
        Datatype::TimeTz,
        Datatype::Boolean,
        Datatype::BinBase64,
        Datatype::BinHex,
        Datatype::Uri,
        Datatype::Uuid,
    ];

    /// The canonical name used in `<dataType>`.
    pub fn descriptor_name(&self) -> &'static str {
        match self {
            Datatype::Ui1 => "ui1",
            Datatype::Ui2 => "ui2",
            Datatype::Ui4 => "ui4",
            Datatype::I1 => "i1",
            Datatype::I2 => "i2",
            Datatype::I4 => "i4",
            Datatype::Int => "int",
            Datatype::R4 => "r4",
            Datatype::R8 => "r8",
            Datatype::Number => "number",
            Datatype::Fixed14_4 => "fixed.14.4",
            Datatype::Float => "float",
            Datatype::Char => "char",
            Datatype::String => "string",
            Datatype::Date => "date",
            Datatype::DateTime => "dateTime",
            Datatype::DateTimeTz => "dateTime.tz",
            Datatype::Time => "time",
            Datatype::TimeTz => "time.tz",
            Datatype::Boolean => "boolean",
            Datatype::BinBase64 => "bin.base64",
            Datatype::BinHex => "bin.hex",
            Datatype::Uri => "uri",
            Datatype::Uuid => "uuid",
        }
    }

    /// Look up a datatype by its descriptor name, ignoring letter case.
    pub fn from_descriptor_name(name: &str) -> Result<Self, UnknownDatatype> {
        Self::ALL
            .iter()
            .copied()
            .find(|datatype| datatype.descriptor_name().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownDatatype(name.to_string()))
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Datatype::Ui1 | Datatype::Ui2 | Datatype::Ui4 | Datatype::I1 | Datatype::I2 | Datatype::I4 | Datatype::Int
        )
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integer()
            || matches!(
                self,
                Datatype::R4 | Datatype::R8 | Datatype::Number | Datatype::Fixed14_4 | Datatype::Float
            )
    }

    /// Lexical check of a string value against this datatype.
    pub fn is_valid_value(&self, value: &str) -> bool {
        match self {
            Datatype::Ui1 => value.parse::<u8>().is_ok(),
            Datatype::Ui2 => value.parse::<u16>().is_ok(),
            Datatype::Ui4 => value.parse::<u32>().is_ok(),
            Datatype::I1 => value.parse::<i8>().is_ok(),
            Datatype::I2 => value.parse::<i16>().is_ok(),
            Datatype::I4 | Datatype::Int => value.parse::<i32>().is_ok(),
            Datatype::R4 => value.parse::<f32>().is_ok(),
            Datatype::R8 | Datatype::Number | Datatype::Float => value.parse::<f64>().is_ok(),
            Datatype::Fixed14_4 => is_fixed_14_4(value),
            Datatype::Char => value.chars().count() == 1,
            Datatype::String => true,
            Datatype::Date => is_date(value),
            Datatype::DateTime => is_date_time(value, false),
            Datatype::DateTimeTz => is_date_time(value, true),
            Datatype::Time => is_time(value, false),
            Datatype::TimeTz => is_time(value, true),
            Datatype::Boolean => matches!(
                value.to_ascii_lowercase().as_str(),
                "0" | "1" | "true" | "false" | "yes" | "no"
            ),
            Datatype::BinBase64 => is_base64(value),
            Datatype::BinHex => value.len() % 2 == 0 && value.chars().all(|c| c.is_ascii_hexdigit()),
            Datatype::Uri => !value.is_empty() && !value.chars().any(char::is_whitespace),
            Datatype::Uuid => Uuid::parse_str(value).is_ok(),
        }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor_name())
    }
}

impl FromStr for Datatype {
    type Err = UnknownDatatype;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_descriptor_name(s)
    }
}

impl From<Datatype> for &'static str {
    fn from(datatype: Datatype) -> Self {
        datatype.descriptor_name()
    }
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn is_fixed_14_4(value: &str) -> bool {
    let unsigned = value.strip_prefix(['-', '+']).unwrap_or(value);
    match unsigned.split_once('.') {
        Some((int, frac)) => all_digits(int) && int.len() <= 14 && all_digits(frac) && frac.len() <= 4,
        None => all_digits(unsigned) && unsigned.len() <= 14,
    }
}

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const DATE_TIME_TZ_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";
// Placeholder day for bare times
const ANY_DATE: &str = "2000-01-01";

fn is_date(value: &str) -> bool {
    // chrono accepts short years; descriptors use four digits
    value.find('-') == Some(4) && NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok()
}

/// Splits a trailing `Z` or `±hh:mm` off a clock value.
fn split_time_zone(clock: &str) -> (&str, Option<&str>) {
    if let Some(stripped) = clock.strip_suffix('Z') {
        return (stripped, Some("+00:00"));
    }
    match clock.rfind(['+', '-']) {
        Some(pos) if pos > 0 => (&clock[..pos], Some(&clock[pos..])),
        _ => (clock, None),
    }
}

fn is_zoned(date: &str, clock: &str, zoned: bool) -> bool {
    let (clock, zone) = if zoned { split_time_zone(clock) } else { (clock, None) };
    match zone {
        Some(zone) => DateTime::parse_from_str(&format!("{date}T{clock}{zone}"), DATE_TIME_TZ_FORMAT).is_ok(),
        None => NaiveDateTime::parse_from_str(&format!("{date}T{clock}"), DATE_TIME_FORMAT).is_ok(),
    }
}

fn is_time(value: &str, zoned: bool) -> bool {
    is_zoned(ANY_DATE, value, zoned)
}

fn is_date_time(value: &str, zoned: bool) -> bool {
    match value.split_once('T') {
        Some((date, clock)) => is_date(date) && is_zoned(date, clock, zoned),
        None => is_date(value),
    }
}

fn is_base64(value: &str) -> bool {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD.decode(compact).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_descriptor_names_round_trip() {
        for datatype in Datatype::ALL {
            assert_eq!(Datatype::from_descriptor_name(datatype.descriptor_name()).unwrap(), datatype);
        }
    }

    #[rstest]
    #[case("STRING", Datatype::String)]
    #[case("datetime.TZ", Datatype::DateTimeTz)]
    #[case("UI4", Datatype::Ui4)]
    fn test_lookup_ignores_case(#[case] name: &str, #[case] expected: Datatype) {
        assert_eq!(name.parse::<Datatype>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_datatype() {
        let err = Datatype::from_descriptor_name("int64").unwrap_err();
        assert_eq!(err, UnknownDatatype("int64".to_string()));
        assert_eq!(err.to_string(), "Unknown datatype: 'int64'");
    }

    #[test]
    fn test_numeric_classification() {
        assert!(Datatype::Ui2.is_integer());
        assert!(Datatype::Ui2.is_numeric());
        assert!(!Datatype::R8.is_integer());
        assert!(Datatype::Fixed14_4.is_numeric());
        assert!(!Datatype::String.is_numeric());
        assert!(!Datatype::Boolean.is_numeric());
    }

    #[rstest]
    #[case(Datatype::Ui1, "255", true)]
    #[case(Datatype::Ui1, "256", false)]
    #[case(Datatype::Ui4, "-1", false)]
    #[case(Datatype::I2, "-32768", true)]
    #[case(Datatype::I4, "2147483648", false)]
    #[case(Datatype::R8, "1.5e3", true)]
    #[case(Datatype::Fixed14_4, "12.3456", true)]
    #[case(Datatype::Fixed14_4, "12.34567", false)]
    #[case(Datatype::Char, "x", true)]
    #[case(Datatype::Char, "xy", false)]
    #[case(Datatype::Boolean, "Yes", true)]
    #[case(Datatype::Boolean, "maybe", false)]
    #[case(Datatype::Date, "2024-02-29", true)]
    #[case(Datatype::Date, "24-02-29", false)]
    #[case(Datatype::DateTime, "2024-02-29T13:45:00", true)]
    #[case(Datatype::DateTimeTz, "2024-02-29T13:45:00+01:00", true)]
    #[case(Datatype::Time, "00:03:12", true)]
    #[case(Datatype::Time, "3:12", false)]
    #[case(Datatype::TimeTz, "10:00:00Z", true)]
    #[case(Datatype::BinHex, "0aFF", true)]
    #[case(Datatype::BinHex, "0aF", false)]
    #[case(Datatype::BinBase64, "aGVsbG8=", true)]
    #[case(Datatype::BinBase64, "aGVsbG8", false)]
    #[case(Datatype::Uri, "http://192.168.1.2:1400/xml", true)]
    #[case(Datatype::Uri, "", false)]
    #[case(Datatype::Uuid, "123e4567-e89b-12d3-a456-426614174000", true)]
    #[case(Datatype::Uuid, "123e4567-e89b-12d3-a456-42661417400g", false)]
    #[case(Datatype::Date, "2024-13-45", false)]
    #[case(Datatype::Date, "2023-02-29", false)]
    #[case(Datatype::Time, "99:99:99", false)]
    #[case(Datatype::Time, "23:59:59.250", true)]
    #[case(Datatype::DateTime, "2024-02-30T25:61:61", false)]
    #[case(Datatype::DateTime, "2024-02-29", true)]
    #[case(Datatype::DateTimeTz, "2024-02-29T13:45:00Z", true)]
    #[case(Datatype::DateTimeTz, "2024-02-29T13:45:00+24:30", false)]
    #[case(Datatype::TimeTz, "10:00:00+99:99", false)]
    #[case(Datatype::TimeTz, "10:00:00-05:00", true)]
    #[case(Datatype::TimeTz, "10:00:00", true)]
    #[case(Datatype::BinBase64, "aGVs=bG8", false)]
    fn test_value_validation(#[case] datatype: Datatype, #[case] value: &str, #[case] expected: bool) {
        assert_eq!(datatype.is_valid_value(value), expected, "{datatype} / {value}");
    }
}
