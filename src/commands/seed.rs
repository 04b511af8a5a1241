//! Seed command - Reference data and initial accounts.
//!
//! Safe to run repeatedly: states and municipalities are upserted, accounts
//! are only created when their email is free and the sample news only go
//! into an empty table.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::cli::args::SeedArgs;
use crate::config::Config;
use crate::domain::{CreateNews, CreateUser, GeoState, Municipality, UserType};
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, Persistence, UnitOfWork};
use crate::services::{NewsManager, NewsService, UserManager, UserService};

const STATES: [(&str, &str); 27] = [
    ("AC", "Acre"),
    ("AL", "Alagoas"),
    ("AP", "Amapá"),
    ("AM", "Amazonas"),
    ("BA", "Bahia"),
    ("CE", "Ceará"),
    ("DF", "Distrito Federal"),
    ("ES", "Espírito Santo"),
    ("GO", "Goiás"),
    ("MA", "Maranhão"),
    ("MT", "Mato Grosso"),
    ("MS", "Mato Grosso do Sul"),
    ("MG", "Minas Gerais"),
    ("PA", "Pará"),
    ("PB", "Paraíba"),
    ("PR", "Paraná"),
    ("PE", "Pernambuco"),
    ("PI", "Piauí"),
    ("RJ", "Rio de Janeiro"),
    ("RN", "Rio Grande do Norte"),
    ("RS", "Rio Grande do Sul"),
    ("RO", "Rondônia"),
    ("RR", "Roraima"),
    ("SC", "Santa Catarina"),
    ("SP", "São Paulo"),
    ("SE", "Sergipe"),
    ("TO", "Tocantins"),
];

const SP_MUNICIPALITIES: [(&str, &str); 5] = [
    ("3550308", "São Paulo"),
    ("3509502", "Campinas"),
    ("3548500", "Santos"),
    ("3543402", "Ribeirão Preto"),
    ("3552205", "Sorocaba"),
];

/// What a seed run changed
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub states: usize,
    pub municipalities: usize,
    pub users_created: usize,
    pub news_created: usize,
}

/// Execute the seed command
pub async fn execute(args: SeedArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config)
        .await
        .map_err(|e| AppError::Config(format!("Database connection failed: {}", e)))?;

    let report = seed(db.get_connection(), &args).await?;
    tracing::info!(
        states = report.states,
        municipalities = report.municipalities,
        users_created = report.users_created,
        news_created = report.news_created,
        "Seed completed"
    );

    if let Err(e) = db.close().await {
        tracing::warn!("Failed to close database connection: {}", e);
    }
    Ok(())
}

/// Load everything into an already migrated database.
pub async fn seed(db: DatabaseConnection, args: &SeedArgs) -> AppResult<SeedReport> {
    let uow = Arc::new(Persistence::new(db));
    let users = UserManager::new(uow.clone());
    let news = NewsManager::new(uow.clone());
    let locations = uow.locations();

    let mut report = SeedReport::default();

    for (id, name) in STATES {
        locations
            .upsert_state(GeoState {
                id: id.to_string(),
                name: name.to_string(),
            })
            .await?;
        report.states += 1;
    }

    for (id, name) in SP_MUNICIPALITIES {
        locations
            .upsert_municipality(Municipality {
                id: id.to_string(),
                name: name.to_string(),
                state_id: "SP".to_string(),
            })
            .await?;
        report.municipalities += 1;
    }

    let admin = ensure_user(
        &users,
        CreateUser {
            email: Some(args.admin_email.clone()),
            password: Some(args.admin_password.clone()),
            name: "Administrador".into(),
            user_type: UserType::Admin,
            state: None,
            municipality: None,
        },
        &mut report,
    )
    .await?;

    ensure_user(
        &users,
        CreateUser {
            email: Some(args.politician_email.clone()),
            password: Some(args.politician_password.clone()),
            name: "João Silva".into(),
            user_type: UserType::Politician,
            state: Some("SP".into()),
            municipality: Some("São Paulo".into()),
        },
        &mut report,
    )
    .await?;

    if news.list().await?.is_empty() {
        for article in sample_news(admin) {
            news.create(article).await?;
            report.news_created += 1;
        }
    }

    Ok(report)
}

async fn ensure_user(
    users: &dyn UserService,
    input: CreateUser,
    report: &mut SeedReport,
) -> AppResult<Uuid> {
    let email = input.email.clone().unwrap_or_default();

    if let Some(existing) = users.get_by_email(&email).await? {
        tracing::debug!(email = %email, "User already seeded");
        return Ok(existing.id);
    }

    let user = users.create(input).await?;
    report.users_created += 1;
    Ok(user.id)
}

fn sample_news(author_id: Uuid) -> Vec<CreateNews> {
    vec![
        CreateNews {
            title: "Nova lei de transparência é aprovada".into(),
            content: "A nova legislação obriga órgãos públicos a publicar seus gastos em \
                      formato aberto, com atualização mensal e acesso gratuito para qualquer \
                      cidadão."
                .into(),
            summary: "Órgãos públicos terão de divulgar gastos em formato aberto.".into(),
            image_url: None,
            featured: true,
            state: None,
            municipality: None,
            category: "Transparência".into(),
            author_id,
        },
        CreateNews {
            title: "Campinas amplia programa de iluminação pública".into(),
            content: "A prefeitura anunciou a troca de mais de dez mil lâmpadas por LED nos \
                      próximos meses, priorizando bairros com maior número de pedidos de \
                      cidadãos."
                .into(),
            summary: "Troca por LED começa pelos bairros com mais pedidos.".into(),
            image_url: None,
            featured: false,
            state: Some("SP".into()),
            municipality: Some("Campinas".into()),
            category: "Infraestrutura".into(),
            author_id,
        },
    ]
}
