//! Entity re-exports.

pub use super::contact_messages::Entity as ContactMessages;
pub use super::faqs::Entity as Faqs;
pub use super::faqs_i18n::Entity as FaqsI18n;
pub use super::profiles::Entity as Profiles;
pub use super::projects::Entity as Projects;
pub use super::projects_i18n::Entity as ProjectsI18n;
pub use super::references::Entity as References;
pub use super::services::Entity as Services;
pub use super::services_i18n::Entity as ServicesI18n;
pub use super::site_settings::Entity as SiteSettings;
pub use super::storage_assets::Entity as StorageAssets;
pub use super::user_roles::Entity as UserRoles;
pub use super::users::Entity as Users;
