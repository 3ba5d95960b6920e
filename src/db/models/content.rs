use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "content_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Video,
    Pdf,
    Ppt,
    Document,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ClassContent {
    pub id: Uuid,
    pub class_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub content_type: ContentType,
    pub file_url: String,
    pub position: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewClassContent {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    pub content_type: ContentType,
    #[validate(url)]
    pub file_url: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateClassContent {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub content_type: Option<ContentType>,
    #[validate(url)]
    pub file_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct MoveClassContent {
    /// 1-based target position within the class; clamped to the sibling count.
    #[validate(range(min = 1))]
    pub position: i32,
}

/// Recompute the sibling order with `moving` placed at `to` (1-based).
/// Positions come back dense, so repeated moves cannot drift into
/// duplicate or sparse position values.
pub fn reorder(siblings: &[Uuid], moving: Uuid, to: usize) -> Vec<Uuid> {
    let mut ordered: Vec<Uuid> = siblings.iter().copied().filter(|id| *id != moving).collect();
    let index = to.saturating_sub(1).min(ordered.len());
    ordered.insert(index, moving);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn move_to_front() {
        let siblings = ids(4);
        let reordered = reorder(&siblings, siblings[3], 1);
        assert_eq!(reordered[0], siblings[3]);
        assert_eq!(&reordered[1..], &siblings[..3]);
    }

    #[test]
    fn move_to_middle() {
        let siblings = ids(4);
        let reordered = reorder(&siblings, siblings[0], 3);
        assert_eq!(
            reordered,
            vec![siblings[1], siblings[2], siblings[0], siblings[3]]
        );
    }

    #[test]
    fn position_past_the_end_is_clamped() {
        let siblings = ids(3);
        let reordered = reorder(&siblings, siblings[0], 99);
        assert_eq!(reordered, vec![siblings[1], siblings[2], siblings[0]]);
    }

    #[test]
    fn result_is_always_dense() {
        let siblings = ids(5);
        let reordered = reorder(&siblings, siblings[2], 5);
        assert_eq!(reordered.len(), siblings.len());
        for id in &siblings {
            assert!(reordered.contains(id));
        }
    }
}
