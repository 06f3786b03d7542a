use sea_orm::*;
use uuid::Uuid;

use crate::models::profiles::{self, CompleteProfile, CreateProfileFromAuth, UpdateProfile, UserType};

/// Find a profile by its auth UUID, creating it from JWT claims on first sight
/// (called by the auth middleware).
pub async fn find_or_create_from_auth(
    db: &DatabaseConnection,
    input: CreateProfileFromAuth,
) -> Result<profiles::Model, DbErr> {
    if let Some(existing) = profiles::Entity::find_by_id(input.id).one(db).await? {
        return Ok(existing);
    }

    let new_profile = profiles::ActiveModel {
        id: Set(input.id),
        email: Set(input.email),
        full_name: Set(input.full_name),
        avatar_url: Set(None),
        phone: Set(None),
        city: Set(None),
        state: Set(None),
        bio: Set(None),
        user_type: Set(input.user_type),
        profile_completed: Set(false),
        plan_id: Set(None),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_profile.insert(db).await
}

/// Fetch a single profile by ID.
pub async fn get_profile_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<profiles::Model>, DbErr> {
    profiles::Entity::find_by_id(id).one(db).await
}

/// Fetch profiles with pagination and an optional user_type filter.
pub async fn get_profiles_paginated(
    db: &DatabaseConnection,
    user_type: Option<UserType>,
    page: u64,
    limit: u64,
) -> Result<Vec<profiles::Model>, DbErr> {
    let mut query = profiles::Entity::find();

    if let Some(user_type) = user_type {
        query = query.filter(profiles::Column::UserType.eq(user_type));
    }

    query
        .order_by_asc(profiles::Column::CreatedAt)
        .paginate(db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
}

/// Complete a profile after first login. The user_type is written here and
/// `profile_completed` flips to true; the handler refuses later changes.
pub async fn complete_profile(
    db: &DatabaseConnection,
    id: Uuid,
    input: CompleteProfile,
) -> Result<profiles::Model, DbErr> {
    let profile = profiles::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Profile not found".to_string()))?;

    let mut active: profiles::ActiveModel = profile.into();

    if let Some(user_type) = input.user_type {
        active.user_type = Set(user_type);
    }
    if let Some(full_name) = input.full_name {
        active.full_name = Set(Some(full_name));
    }
    if let Some(phone) = input.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(city) = input.city {
        active.city = Set(Some(city));
    }
    if let Some(state) = input.state {
        active.state = Set(Some(state));
    }
    if let Some(bio) = input.bio {
        active.bio = Set(Some(bio));
    }
    active.profile_completed = Set(true);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Update an existing profile (self-service or admin).
pub async fn update_profile(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateProfile,
) -> Result<profiles::Model, DbErr> {
    let profile = profiles::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Profile not found".to_string()))?;

    let mut active: profiles::ActiveModel = profile.into();

    if let Some(full_name) = input.full_name {
        active.full_name = Set(Some(full_name));
    }
    if let Some(avatar_url) = input.avatar_url {
        active.avatar_url = Set(Some(avatar_url));
    }
    if let Some(phone) = input.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(city) = input.city {
        active.city = Set(Some(city));
    }
    if let Some(state) = input.state {
        active.state = Set(Some(state));
    }
    if let Some(bio) = input.bio {
        active.bio = Set(Some(bio));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Assign (or clear) a plan on a profile.
pub async fn assign_plan(
    db: &DatabaseConnection,
    id: Uuid,
    plan_id: Option<Uuid>,
) -> Result<profiles::Model, DbErr> {
    let profile = profiles::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Profile not found".to_string()))?;

    let mut active: profiles::ActiveModel = profile.into();
    active.plan_id = Set(plan_id);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete a profile by ID.
pub async fn delete_profile(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    profiles::Entity::delete_by_id(id).exec(db).await
}
