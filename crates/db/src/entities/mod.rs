//! `SeaORM` entity definitions.
//!
//! Primary keys are UUID strings stored as `CHAR(36)`.

pub mod prelude;

pub mod contact_messages;
pub mod faqs;
pub mod faqs_i18n;
pub mod profiles;
pub mod projects;
pub mod projects_i18n;
pub mod references;
pub mod services;
pub mod services_i18n;
pub mod site_settings;
pub mod storage_assets;
pub mod user_roles;
pub mod users;
