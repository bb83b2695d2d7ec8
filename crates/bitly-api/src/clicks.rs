//! Click analytics: query parameters, per-period counts, and the summed
//! result built from a `GET /v4/bitlinks/{domain}/{hash}/clicks` payload.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::Error;
use crate::link::LinkReference;
use crate::models::Extra;

/// `unit_count` value meaning "every period the API has".
pub const ALL_PERIODS: i32 = -1;

const LINK_CLICKS: &str = "link_clicks";

// ── Time unit ────────────────────────────────────────────────────────

/// Bucket granularity for click counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Minute,
    Hour,
    #[default]
    Day,
    Week,
    Month,
}

impl TimeUnit {
    pub const ALL: [Self; 5] = [Self::Minute, Self::Hour, Self::Day, Self::Week, Self::Month];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.as_str() == s)
            .ok_or_else(|| Error::InvalidQuery {
                field: "unit",
                reason: format!("expected one of minute, hour, day, week, month; got '{s}'"),
            })
    }
}

// ── Query ────────────────────────────────────────────────────────────

/// Parameters for a clicks lookup.
///
/// Defaults to daily buckets over every available period, ending now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClicksQuery {
    pub link: LinkReference,
    pub unit: TimeUnit,
    /// [`ALL_PERIODS`] or a positive period count.
    pub unit_count: i32,
    /// End of the most recent period; `None` means now.
    pub reference_time: Option<DateTime<FixedOffset>>,
}

impl ClicksQuery {
    /// Query for a link given in any form [`LinkReference::parse`] accepts.
    pub fn new(link: &str) -> Self {
        Self::for_link(LinkReference::parse(link))
    }

    pub fn for_link(link: LinkReference) -> Self {
        Self {
            link,
            unit: TimeUnit::default(),
            unit_count: ALL_PERIODS,
            reference_time: None,
        }
    }

    pub fn with_unit(mut self, unit: TimeUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_unit_count(mut self, unit_count: i32) -> Self {
        self.unit_count = unit_count;
        self
    }

    pub fn with_reference_time<Tz: TimeZone>(mut self, at: &DateTime<Tz>) -> Self {
        self.reference_time = Some(at.fixed_offset());
        self
    }

    /// Reject a query the API would refuse, before anything is sent.
    pub fn validate(&self) -> Result<(), Error> {
        if self.unit_count == ALL_PERIODS || self.unit_count > 0 {
            Ok(())
        } else {
            Err(Error::InvalidQuery {
                field: "unit_count",
                reason: format!("must be -1 or positive, got {}", self.unit_count),
            })
        }
    }

    /// Query-string pairs in the API's naming.
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("unit", self.unit.as_str().to_owned()),
            ("units", self.unit_count.to_string()),
        ];
        if let Some(at) = self.reference_time {
            params.push(("unit_reference", at.format("%Y-%m-%dT%H:%M:%S%z").to_string()));
        }
        params
    }
}

// ── Periods and result ───────────────────────────────────────────────

/// Click count for one time bucket, exactly as the API sent it. Period
/// markers (`date`, etc.) are kept untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickPeriod {
    pub clicks: Number,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ClickPeriod {
    pub fn new(clicks: impl Into<Number>) -> Self {
        Self {
            clicks: clicks.into(),
            extra: Extra::new(),
        }
    }
}

/// Per-period click counts plus their sum.
///
/// Built once from a response and read-only afterwards, so the total is
/// always the sum of the periods' counts. The sum is exact while every
/// count is an integer and the running total fits in `i64`; otherwise it
/// is taken in `f64`. Top-level response fields other than the period
/// list (`unit`, `units`, `unit_reference`, ...) are carried in
/// [`extra`](Self::extra).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClicksResult {
    periods: Vec<ClickPeriod>,
    total_clicks: Number,
    #[serde(flatten)]
    extra: Extra,
}

/// Sum click counts across periods, keeping the periods in order.
///
/// Only fails when the floating-point sum is not finite.
pub fn aggregate(periods: &[ClickPeriod]) -> Result<ClicksResult, Error> {
    ClicksResult::from_parts(periods.to_vec(), Extra::new())
}

fn sum_clicks(periods: &[ClickPeriod]) -> Result<Number, Error> {
    let exact = periods.iter().try_fold(0_i64, |total, period| {
        period.clicks.as_i64().and_then(|c| total.checked_add(c))
    });
    if let Some(total) = exact {
        return Ok(total.into());
    }

    let total: f64 = periods.iter().filter_map(|p| p.clicks.as_f64()).sum();
    Number::from_f64(total)
        .ok_or_else(|| Error::malformed(format!("click total is not a finite number: {total}")))
}

impl ClicksResult {
    fn from_parts(periods: Vec<ClickPeriod>, extra: Extra) -> Result<Self, Error> {
        let total_clicks = sum_clicks(&periods)?;
        Ok(Self {
            periods,
            total_clicks,
            extra,
        })
    }

    /// Decode a raw clicks payload and aggregate it.
    ///
    /// Fails with [`Error::MalformedResponse`] when `link_clicks` is missing
    /// or not an array, or when any period lacks a numeric `clicks`.
    pub fn from_response(value: Value) -> Result<Self, Error> {
        let Value::Object(mut fields) = value else {
            return Err(Error::malformed("clicks response is not a JSON object"));
        };
        let Some(raw) = fields.remove(LINK_CLICKS) else {
            return Err(Error::malformed("clicks response has no `link_clicks` field"));
        };
        let Value::Array(items) = raw else {
            return Err(Error::malformed("`link_clicks` is not an array"));
        };

        let periods = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| decode_period(index, item))
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_parts(periods, fields)
    }

    /// Periods in the order the API returned them.
    pub fn periods(&self) -> &[ClickPeriod] {
        &self.periods
    }

    pub fn total_clicks(&self) -> &Number {
        &self.total_clicks
    }

    /// Pass-through top-level fields from the response.
    pub fn extra(&self) -> &Extra {
        &self.extra
    }

    /// The bucket granularity the API reported, if any.
    pub fn unit(&self) -> Option<TimeUnit> {
        self.extra
            .get("unit")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
    }

    pub fn into_periods(self) -> Vec<ClickPeriod> {
        self.periods
    }
}

fn decode_period(index: usize, item: Value) -> Result<ClickPeriod, Error> {
    let Value::Object(mut fields) = item else {
        return Err(Error::malformed(format!(
            "link_clicks[{index}] is not a JSON object"
        )));
    };
    let clicks = match fields.remove("clicks") {
        Some(Value::Number(n)) => n,
        Some(other) => {
            return Err(Error::malformed(format!(
                "link_clicks[{index}].clicks is not a number: {other}"
            )));
        }
        None => {
            return Err(Error::malformed(format!(
                "link_clicks[{index}] has no `clicks` field"
            )));
        }
    };
    Ok(ClickPeriod {
        clicks,
        extra: fields,
    })
}
