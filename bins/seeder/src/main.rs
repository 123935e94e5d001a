//! Database seeder for local development.
//!
//! Creates an admin account, the default site settings and a little demo
//! content. Every step skips rows that already exist, so reruns are safe.
//!
//! Usage:
//!   `SEED_ADMIN_PASSWORD=... seeder`

use std::sync::Arc;

use anyhow::Context;
use sea_orm::DatabaseConnection;
use serde_json::json;
use toronto_core::{
    auth::{UserRole, hash_password},
    query::ListQuery,
};
use toronto_db::{
    FaqRepository, ProjectRepository, ServiceRepository, SiteSettingRepository, UserRepository,
    entities::site_settings::ANY_LOCALE,
    repositories::{
        CreateFaqInput, CreateProjectInput, CreateServiceInput, CreateSiteSettingInput,
        CreateUserInput, FaqTranslationInput, ProjectTranslationInput, ServiceTranslationInput,
    },
};
use toronto_shared::AppConfig;
use tracing::info;

const DEFAULT_ADMIN_EMAIL: &str = "admin@toronto.local";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seeder=info,toronto=info".into()),
        )
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    let db = Arc::new(
        toronto_db::connect(&config.database)
            .await
            .context("failed to connect to database")?,
    );
    info!("Connected to database");

    seed_admin(&db).await?;
    seed_site_settings(&db).await?;
    seed_services(&db).await?;
    seed_projects(&db).await?;
    seed_faqs(&db).await?;

    info!("Seeding complete");
    Ok(())
}

/// Admin account from `SEED_ADMIN_EMAIL` / `SEED_ADMIN_PASSWORD`.
async fn seed_admin(db: &Arc<DatabaseConnection>) -> anyhow::Result<()> {
    let email =
        std::env::var("SEED_ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string());
    let repo = UserRepository::new(db.clone());
    if repo.email_exists(&email).await? {
        info!(%email, "Admin user already exists, skipping");
        return Ok(());
    }

    let password = std::env::var("SEED_ADMIN_PASSWORD")
        .context("SEED_ADMIN_PASSWORD must be set to create the admin user")?;
    let password_hash = hash_password(&password)?;

    let user = repo
        .create(CreateUserInput {
            email,
            password_hash,
            full_name: Some("Site Admin".to_string()),
            roles: vec![UserRole::Admin],
        })
        .await?;
    info!(user_id = %user.id, email = %user.email, "Created admin user");
    Ok(())
}

async fn seed_site_settings(db: &Arc<DatabaseConnection>) -> anyhow::Result<()> {
    let repo = SiteSettingRepository::new(db.clone());
    let rows = [
        ("site_name", ANY_LOCALE, json!("Toronto")),
        (
            "contact",
            ANY_LOCALE,
            json!({ "email": "info@toronto.local", "phone": "+90 212 000 00 00" }),
        ),
        (
            "social",
            ANY_LOCALE,
            json!({ "instagram": "https://instagram.com/toronto", "linkedin": null }),
        ),
        ("hero_title", "tr", json!("Mekanlarınızı birlikte tasarlayalım")),
        ("hero_title", "en", json!("Let's design your spaces together")),
        ("hero_title", "de", json!("Gestalten wir Ihre Räume gemeinsam")),
    ];

    let mut created = 0usize;
    for (key, locale, value) in rows {
        if repo.exists(key, locale, None).await? {
            continue;
        }
        repo.create(CreateSiteSettingInput {
            key: key.to_string(),
            locale: locale.to_string(),
            value,
        })
        .await?;
        created += 1;
    }
    info!(created, "Seeded site settings");
    Ok(())
}

async fn seed_services(db: &Arc<DatabaseConnection>) -> anyhow::Result<()> {
    let repo = ServiceRepository::new(db.clone());
    let slug = "interior-design";
    if repo.slug_exists(slug, None).await? {
        info!(slug, "Service already exists, skipping");
        return Ok(());
    }

    let translation = |locale: &str, name: &str, summary: &str| ServiceTranslationInput {
        locale: locale.to_string(),
        name: name.to_string(),
        summary: Some(summary.to_string()),
        content: None,
    };
    repo.create(CreateServiceInput {
        slug: slug.to_string(),
        icon: Some("sofa".to_string()),
        image_url: None,
        is_featured: true,
        is_active: true,
        display_order: 1,
        translations: vec![
            translation("tr", "İç Mimari", "Konut ve ofisler için iç mimari tasarım."),
            translation("en", "Interior Design", "Interior design for homes and offices."),
            translation("de", "Innenarchitektur", "Innenarchitektur für Wohnungen und Büros."),
        ],
    })
    .await?;
    info!(slug, "Created demo service");
    Ok(())
}

async fn seed_projects(db: &Arc<DatabaseConnection>) -> anyhow::Result<()> {
    let repo = ProjectRepository::new(db.clone());
    let slug = "bosphorus-villa";
    if repo.slug_exists(slug, None).await? {
        info!(slug, "Project already exists, skipping");
        return Ok(());
    }

    let translation = |locale: &str, title: &str| ProjectTranslationInput {
        locale: locale.to_string(),
        title: title.to_string(),
        summary: None,
        content: None,
        meta_title: Some(title.to_string()),
        meta_description: None,
    };
    repo.create(CreateProjectInput {
        slug: slug.to_string(),
        category: Some("residential".to_string()),
        client_name: None,
        location: Some("Istanbul".to_string()),
        project_year: Some(2024),
        cover_image_url: None,
        gallery: Some(json!([])),
        is_featured: true,
        is_active: true,
        display_order: 1,
        translations: vec![
            translation("tr", "Boğaz Villası"),
            translation("en", "Bosphorus Villa"),
            translation("de", "Bosporus-Villa"),
        ],
    })
    .await?;
    info!(slug, "Created demo project");
    Ok(())
}

async fn seed_faqs(db: &Arc<DatabaseConnection>) -> anyhow::Result<()> {
    let repo = FaqRepository::new(db.clone());
    let existing = repo
        .list_localized(&ListQuery::default(), &[], false)
        .await?;
    if !existing.is_empty() {
        info!(count = existing.len(), "FAQs already present, skipping");
        return Ok(());
    }

    repo.create(CreateFaqInput {
        category: Some("general".to_string()),
        is_active: true,
        display_order: 1,
        translations: vec![
            FaqTranslationInput {
                locale: "tr".to_string(),
                question: "Proje süreci ne kadar sürer?".to_string(),
                answer: "Kapsama göre genellikle 6 ile 12 hafta arasında.".to_string(),
            },
            FaqTranslationInput {
                locale: "en".to_string(),
                question: "How long does a project take?".to_string(),
                answer: "Usually between 6 and 12 weeks depending on scope.".to_string(),
            },
        ],
    })
    .await?;
    info!("Created demo FAQ");
    Ok(())
}
