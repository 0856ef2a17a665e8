use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::Utc;

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pictures")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub event_id: Uuid,
    pub url: String,
    /// Comma-joined tags, e.g. `summer,beach`.
    pub hashtags: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::event::Entity",
        from = "Column::EventId",
        to = "super::event::Column::Id",
        on_delete = "Cascade"
    )]
    Event,
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef { Relation::Event.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn hashtag_list(&self) -> Vec<String> { split_hashtags(&self.hashtags) }

    pub fn matches_hashtag(&self, query: &str) -> bool { matches_hashtag(&self.hashtags, query) }
}

pub fn split_hashtags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_hashtags<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// Case-insensitive substring match of `query` against each tag. A leading
/// `#` on the query is ignored; an empty query matches nothing.
pub fn matches_hashtag(raw: &str, query: &str) -> bool {
    let q = query.trim().trim_start_matches('#').to_lowercase();
    if q.is_empty() {
        return false;
    }
    split_hashtags(raw).iter().any(|t| t.to_lowercase().contains(&q))
}

pub const URL_MAX: usize = 1024;

/// Non-blank and within the `pictures.url` column width.
pub fn check_url(url: &str) -> Result<(), ModelError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ModelError::Validation("Picture url cannot be blank".into()));
    }
    if url.chars().count() > URL_MAX {
        return Err(ModelError::Validation("Picture url must be at most 1024 characters".into()));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, event_id: Uuid, url: &str, hashtags: &str) -> Result<Model, ModelError> {
    check_url(url)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        event_id: Set(event_id),
        url: Set(url.trim().to_string()),
        hashtags: Set(join_hashtags(&split_hashtags(hashtags))),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| ModelError::from_db(e, "picture"))
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Model>, ModelError> {
    Entity::find_by_id(id).one(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn list_by_event<C: ConnectionTrait>(db: &C, event_id: Uuid) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .filter(Column::EventId.eq(event_id))
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

/// Returns `true` when a row was removed.
pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashtags_split_and_trim() {
        assert_eq!(split_hashtags(" summer, beach ,,party "), vec!["summer", "beach", "party"]);
        assert!(split_hashtags("").is_empty());
    }

    #[test]
    fn join_drops_blank_tags() {
        assert_eq!(join_hashtags(&["a", " ", " b "]), "a,b");
    }

    #[test]
    fn hashtag_match_is_case_insensitive_substring() {
        assert!(matches_hashtag("Summer,beach", "summ"));
        assert!(matches_hashtag("Summer,beach", "#BEACH"));
        assert!(!matches_hashtag("Summer,beach", "party"));
        assert!(!matches_hashtag("Summer,beach", "#"));
    }

    #[test]
    fn url_must_fit_the_column() {
        assert!(check_url("https://images.unsplash.com/a").is_ok());
        assert!(matches!(check_url("  "), Err(ModelError::Validation(_))));
        let long = format!("https://x.io/{}", "a".repeat(URL_MAX));
        assert!(matches!(check_url(&long), Err(ModelError::Validation(_))));
    }
}
