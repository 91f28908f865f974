//! Interest-rate source selection and resolution

mod resolver;
mod source;

pub use resolver::{
    composite_annual_rate, RateResolver, RateUnavailable, ResolvedRate, BUSINESS_DAYS_PER_YEAR,
    DEFAULT_PARTICIPATION_PERCENT,
};
pub use source::{Cadence, RateSource};
