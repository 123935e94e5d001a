//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod contact;
pub mod error;
pub mod faq;
pub mod listing;
pub mod profile;
pub mod project;
pub mod reference;
pub mod service;
pub mod site_setting;
pub mod storage_asset;
pub mod translation;
pub mod user;
pub mod user_role;

#[cfg(test)]
mod listing_tests;

pub use contact::{ContactRepository, CreateContactInput, UpdateContactInput};
pub use error::{RepoResult, RepositoryError};
pub use faq::{
    CreateFaqInput, FaqRepository, FaqTranslationInput, FaqWithTranslations, LocalizedFaq,
    UpdateFaqInput,
};
pub use listing::{ListSpec, apply_list_query, build_condition, filter_and_order};
pub use profile::{ProfileRepository, UpdateProfileInput};
pub use project::{
    CreateProjectInput, LocalizedProject, ProjectRepository, ProjectTranslationInput,
    ProjectWithTranslations, UpdateProjectInput,
};
pub use reference::{CreateReferenceInput, ReferenceRepository, UpdateReferenceInput};
pub use service::{
    CreateServiceInput, LocalizedService, ServiceRepository, ServiceTranslationInput,
    ServiceWithTranslations, UpdateServiceInput,
};
pub use site_setting::{
    CreateSiteSettingInput, SiteSettingRepository, UpdateSiteSettingInput, resolve_settings,
};
pub use storage_asset::{CreateStorageAssetInput, StorageAssetRepository, UpdateStorageAssetInput};
pub use translation::{Localized, Translation, pick_translation};
pub use user::{CreateUserInput, UserRepository};
pub use user_role::UserRoleRepository;
