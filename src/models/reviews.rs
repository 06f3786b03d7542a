use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::status::EngagementKind;

pub const RATING_MIN: i16 = 1;
pub const RATING_MAX: i16 = 5;

/// SeaORM entity for the `reviews` table. `engagement_id` points at a project
/// or a partnership demand depending on `engagement_kind`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub engagement_kind: EngagementKind,
    pub engagement_id: Uuid,
    pub reviewer_id: Uuid,
    pub reviewed_id: Uuid,
    pub rating: i16,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::ReviewerId",
        to = "super::profiles::Column::Id"
    )]
    Reviewer,
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::ReviewedId",
        to = "super::profiles::Column::Id"
    )]
    Reviewed,
}

impl ActiveModelBehavior for ActiveModel {}

pub fn rating_in_range(rating: i16) -> bool {
    (RATING_MIN..=RATING_MAX).contains(&rating)
}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReview {
    pub engagement_kind: EngagementKind,
    pub engagement_id: Uuid,
    pub reviewed_id: Uuid,
    pub rating: i16,
    pub comment: Option<String>,
}

/// Reviews received by a profile, with the aggregate shown on their page.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileReviews {
    pub reviews: Vec<Model>,
    pub count: usize,
    pub average_rating: Option<f64>,
}

impl ProfileReviews {
    pub fn from_reviews(reviews: Vec<Model>) -> Self {
        let count = reviews.len();
        let average_rating = if count == 0 {
            None
        } else {
            Some(reviews.iter().map(|r| r.rating as f64).sum::<f64>() / count as f64)
        };
        Self {
            reviews,
            count,
            average_rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn rating_bounds_are_inclusive() {
        assert!(!rating_in_range(0));
        assert!(rating_in_range(1));
        assert!(rating_in_range(5));
        assert!(!rating_in_range(6));
        assert!(!rating_in_range(-3));
    }

    #[test]
    fn profile_reviews_aggregates_mean() {
        let review = |rating| Model {
            id: Uuid::new_v4(),
            engagement_kind: EngagementKind::Project,
            engagement_id: Uuid::new_v4(),
            reviewer_id: Uuid::new_v4(),
            reviewed_id: Uuid::new_v4(),
            rating,
            comment: None,
            created_at: Utc::now(),
        };

        let empty = ProfileReviews::from_reviews(vec![]);
        assert_eq!(empty.count, 0);
        assert!(empty.average_rating.is_none());

        let some = ProfileReviews::from_reviews(vec![review(4), review(5), review(3)]);
        assert_eq!(some.count, 3);
        assert_eq!(some.average_rating, Some(4.0));
    }
}
