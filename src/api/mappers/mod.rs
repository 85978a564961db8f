//! Conversions from service entities into public representations.
//!
//! Mappers are pure and never attach links: handlers know the mount path and
//! add links afterwards.

pub mod api;
pub mod application;
pub mod page;
pub mod rating;

pub use api::{convert_api, convert_plan};
pub use application::{
    convert_application, convert_log, convert_member, convert_notification_setting,
    settings_from_input, update_from_input,
};
pub use page::{convert_page, parse_configuration, reindex_metadata};
pub use rating::convert_rating;
