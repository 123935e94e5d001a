//! Content tables: projects, services, FAQs (each with translations),
//! references, site settings, contact messages and storage assets.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for sql in [
            PROJECTS_SQL,
            PROJECTS_I18N_SQL,
            SERVICES_SQL,
            SERVICES_I18N_SQL,
            FAQS_SQL,
            FAQS_I18N_SQL,
            REFERENCES_SQL,
            SITE_SETTINGS_SQL,
            CONTACT_MESSAGES_SQL,
            STORAGE_ASSETS_SQL,
        ] {
            db.execute_unprepared(sql).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for table in [
            "storage_assets",
            "contact_messages",
            "site_settings",
            "references",
            "faqs_i18n",
            "faqs",
            "services_i18n",
            "services",
            "projects_i18n",
            "projects",
        ] {
            db.execute_unprepared(&format!("DROP TABLE IF EXISTS `{table}`"))
                .await?;
        }
        Ok(())
    }
}

const PROJECTS_SQL: &str = r"
CREATE TABLE IF NOT EXISTS projects (
    id CHAR(36) NOT NULL PRIMARY KEY,
    slug VARCHAR(191) NOT NULL,
    category VARCHAR(128) NULL,
    client_name VARCHAR(255) NULL,
    location VARCHAR(255) NULL,
    project_year INT NULL,
    cover_image_url VARCHAR(1024) NULL,
    gallery JSON NULL,
    is_featured TINYINT(1) NOT NULL DEFAULT 0,
    is_active TINYINT(1) NOT NULL DEFAULT 1,
    display_order INT NOT NULL DEFAULT 0,
    created_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3),
    updated_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3) ON UPDATE CURRENT_TIMESTAMP(3),
    UNIQUE KEY projects_slug_unique (slug),
    KEY projects_active_order_idx (is_active, display_order)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci
";

const PROJECTS_I18N_SQL: &str = r"
CREATE TABLE IF NOT EXISTS projects_i18n (
    id CHAR(36) NOT NULL PRIMARY KEY,
    project_id CHAR(36) NOT NULL,
    locale VARCHAR(8) NOT NULL,
    title VARCHAR(255) NOT NULL,
    summary VARCHAR(1000) NULL,
    content LONGTEXT NULL,
    meta_title VARCHAR(255) NULL,
    meta_description VARCHAR(500) NULL,
    created_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3),
    updated_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3) ON UPDATE CURRENT_TIMESTAMP(3),
    UNIQUE KEY projects_i18n_parent_locale_unique (project_id, locale),
    CONSTRAINT fk_projects_i18n_project FOREIGN KEY (project_id) REFERENCES projects (id) ON DELETE CASCADE
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci
";

const SERVICES_SQL: &str = r"
CREATE TABLE IF NOT EXISTS services (
    id CHAR(36) NOT NULL PRIMARY KEY,
    slug VARCHAR(191) NOT NULL,
    icon VARCHAR(128) NULL,
    image_url VARCHAR(1024) NULL,
    is_featured TINYINT(1) NOT NULL DEFAULT 0,
    is_active TINYINT(1) NOT NULL DEFAULT 1,
    display_order INT NOT NULL DEFAULT 0,
    created_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3),
    updated_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3) ON UPDATE CURRENT_TIMESTAMP(3),
    UNIQUE KEY services_slug_unique (slug),
    KEY services_active_order_idx (is_active, display_order)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci
";

const SERVICES_I18N_SQL: &str = r"
CREATE TABLE IF NOT EXISTS services_i18n (
    id CHAR(36) NOT NULL PRIMARY KEY,
    service_id CHAR(36) NOT NULL,
    locale VARCHAR(8) NOT NULL,
    name VARCHAR(255) NOT NULL,
    summary VARCHAR(1000) NULL,
    content LONGTEXT NULL,
    created_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3),
    updated_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3) ON UPDATE CURRENT_TIMESTAMP(3),
    UNIQUE KEY services_i18n_parent_locale_unique (service_id, locale),
    CONSTRAINT fk_services_i18n_service FOREIGN KEY (service_id) REFERENCES services (id) ON DELETE CASCADE
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci
";

const FAQS_SQL: &str = r"
CREATE TABLE IF NOT EXISTS faqs (
    id CHAR(36) NOT NULL PRIMARY KEY,
    category VARCHAR(128) NULL,
    is_active TINYINT(1) NOT NULL DEFAULT 1,
    display_order INT NOT NULL DEFAULT 0,
    created_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3),
    updated_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3) ON UPDATE CURRENT_TIMESTAMP(3),
    KEY faqs_active_order_idx (is_active, display_order)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci
";

const FAQS_I18N_SQL: &str = r"
CREATE TABLE IF NOT EXISTS faqs_i18n (
    id CHAR(36) NOT NULL PRIMARY KEY,
    faq_id CHAR(36) NOT NULL,
    locale VARCHAR(8) NOT NULL,
    question VARCHAR(500) NOT NULL,
    answer TEXT NOT NULL,
    created_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3),
    updated_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3) ON UPDATE CURRENT_TIMESTAMP(3),
    UNIQUE KEY faqs_i18n_parent_locale_unique (faq_id, locale),
    CONSTRAINT fk_faqs_i18n_faq FOREIGN KEY (faq_id) REFERENCES faqs (id) ON DELETE CASCADE
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci
";

// `references` is a reserved word in MySQL and must stay quoted.
const REFERENCES_SQL: &str = r"
CREATE TABLE IF NOT EXISTS `references` (
    id CHAR(36) NOT NULL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    logo_url VARCHAR(1024) NULL,
    website_url VARCHAR(1024) NULL,
    category VARCHAR(128) NULL,
    is_active TINYINT(1) NOT NULL DEFAULT 1,
    display_order INT NOT NULL DEFAULT 0,
    created_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3),
    updated_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3) ON UPDATE CURRENT_TIMESTAMP(3),
    KEY references_active_order_idx (is_active, display_order)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci
";

const SITE_SETTINGS_SQL: &str = r"
CREATE TABLE IF NOT EXISTS site_settings (
    id CHAR(36) NOT NULL PRIMARY KEY,
    `key` VARCHAR(100) NOT NULL,
    locale VARCHAR(8) NOT NULL DEFAULT '*',
    value JSON NOT NULL,
    created_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3),
    updated_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3) ON UPDATE CURRENT_TIMESTAMP(3),
    UNIQUE KEY site_settings_key_locale_unique (`key`, locale)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci
";

const CONTACT_MESSAGES_SQL: &str = r"
CREATE TABLE IF NOT EXISTS contact_messages (
    id CHAR(36) NOT NULL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL,
    phone VARCHAR(64) NULL,
    subject VARCHAR(255) NULL,
    message TEXT NOT NULL,
    locale VARCHAR(8) NULL,
    status VARCHAR(32) NOT NULL DEFAULT 'new',
    is_resolved TINYINT(1) NOT NULL DEFAULT 0,
    admin_note VARCHAR(2000) NULL,
    ip VARCHAR(64) NULL,
    user_agent VARCHAR(512) NULL,
    created_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3),
    updated_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3) ON UPDATE CURRENT_TIMESTAMP(3),
    KEY contact_messages_status_idx (status, created_at)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci
";

const STORAGE_ASSETS_SQL: &str = r"
CREATE TABLE IF NOT EXISTS storage_assets (
    id CHAR(36) NOT NULL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    bucket VARCHAR(64) NOT NULL,
    path VARCHAR(512) NOT NULL,
    folder VARCHAR(255) NULL,
    mime VARCHAR(127) NOT NULL,
    size BIGINT NOT NULL DEFAULT 0,
    url VARCHAR(1024) NULL,
    width INT NULL,
    height INT NULL,
    metadata JSON NULL,
    created_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3),
    updated_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3) ON UPDATE CURRENT_TIMESTAMP(3),
    UNIQUE KEY storage_assets_bucket_path_unique (bucket, path(191)),
    KEY storage_assets_folder_idx (bucket, folder)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci
";
