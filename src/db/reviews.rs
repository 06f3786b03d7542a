use sea_orm::*;
use uuid::Uuid;

use crate::models::reviews::{self, CreateReview};
use crate::models::status::EngagementKind;

/// Insert a review. A duplicate (engagement, reviewer, reviewed) triple
/// surfaces as a unique-constraint DbErr.
pub async fn insert_review(
    db: &DatabaseConnection,
    input: CreateReview,
    reviewer_id: Uuid,
) -> Result<reviews::Model, DbErr> {
    let new_review = reviews::ActiveModel {
        id: Set(Uuid::new_v4()),
        engagement_kind: Set(input.engagement_kind),
        engagement_id: Set(input.engagement_id),
        reviewer_id: Set(reviewer_id),
        reviewed_id: Set(input.reviewed_id),
        rating: Set(input.rating),
        comment: Set(input.comment),
        created_at: Set(chrono::Utc::now()),
    };

    new_review.insert(db).await
}

/// Fetch all reviews received by a profile, newest first.
pub async fn get_reviews_for_reviewed(
    db: &DatabaseConnection,
    reviewed_id: Uuid,
) -> Result<Vec<reviews::Model>, DbErr> {
    reviews::Entity::find()
        .filter(reviews::Column::ReviewedId.eq(reviewed_id))
        .order_by_desc(reviews::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch the reviews attached to one engagement (at most two: one per party).
pub async fn get_reviews_for_engagement(
    db: &DatabaseConnection,
    engagement_kind: EngagementKind,
    engagement_id: Uuid,
) -> Result<Vec<reviews::Model>, DbErr> {
    reviews::Entity::find()
        .filter(reviews::Column::EngagementKind.eq(engagement_kind))
        .filter(reviews::Column::EngagementId.eq(engagement_id))
        .order_by_asc(reviews::Column::CreatedAt)
        .all(db)
        .await
}
