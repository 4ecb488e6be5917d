use storage::{
    Backend,
    catalog::CatalogReport,
    dto::competition::{CompetitionRoster, CompetitionStats},
    error::Result,
    models::{Category, Competition},
    services::{competitions, projection},
};

/// List competitions, optionally restricted to one category
pub async fn list_competitions(
    backend: &dyn Backend,
    category: Option<Category>,
) -> Result<Vec<Competition>> {
    competitions::list_competitions(backend, category).await
}

/// Entry statistics; zeros with `available = false` when the backend fails
pub async fn get_competition_stats(backend: &dyn Backend) -> CompetitionStats {
    projection::get_competition_stats(backend).await
}

pub async fn get_competition_roster(backend: &dyn Backend) -> Result<CompetitionRoster> {
    competitions::get_competition_roster(backend).await
}

pub async fn reconcile_catalog(backend: &dyn Backend) -> Result<CatalogReport> {
    competitions::reconcile_catalog(backend).await
}
