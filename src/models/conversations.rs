use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::profiles::{self, UserType};

/// SeaORM entity for the `conversations` table. One conversation exists per
/// (client, professional) pair; `demand_id` records the partnership demand
/// that started the conversation, when there was one.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "conversations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub client_id: Uuid,
    pub professional_id: Uuid,
    pub demand_id: Option<Uuid>,
    pub created_at: DateTimeUtc,
}

impl Model {
    /// Whether the given profile is one of the two parties.
    pub fn has_party(&self, profile_id: Uuid) -> bool {
        self.client_id == profile_id || self.professional_id == profile_id
    }

    /// The counterpart of the given party.
    pub fn other_party(&self, profile_id: Uuid) -> Uuid {
        if self.client_id == profile_id {
            self.professional_id
        } else {
            self.client_id
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::messages::Entity")]
    Messages,
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::ClientId",
        to = "super::profiles::Column::Id"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::demands::Entity",
        from = "Column::DemandId",
        to = "super::demands::Column::Id"
    )]
    Demand,
}

impl Related<super::messages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Orient two profiles into the (client, professional) column order, or None
/// when the pair is not a client/professional combination.
pub fn orient_pair<'a>(
    a: &'a profiles::Model,
    b: &'a profiles::Model,
) -> Option<(&'a profiles::Model, &'a profiles::Model)> {
    match (&a.user_type, &b.user_type) {
        (UserType::Client, UserType::Professional) => Some((a, b)),
        (UserType::Professional, UserType::Client) => Some((b, a)),
        _ => None,
    }
}

// ── DTOs ──

/// Request body for get-or-create. The caller is one party; `participant_id`
/// is the other.
#[derive(Debug, Clone, Deserialize)]
pub struct StartConversation {
    pub participant_id: Uuid,
    pub demand_id: Option<Uuid>,
}

/// Response for the conversations list endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationSummary {
    pub conversation_id: Uuid,
    pub other_party_id: Uuid,
    pub other_party_name: Option<String>,
    pub demand_id: Option<Uuid>,
    pub last_message: Option<String>,
    pub last_message_at: Option<chrono::DateTime<chrono::Utc>>,
    pub unread_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn profile(user_type: UserType) -> profiles::Model {
        profiles::Model {
            id: Uuid::new_v4(),
            email: format!("{}@example.com", Uuid::new_v4()),
            full_name: None,
            avatar_url: None,
            phone: None,
            city: None,
            state: None,
            bio: None,
            user_type,
            profile_completed: true,
            plan_id: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn orient_pair_puts_client_first_either_way() {
        let client = profile(UserType::Client);
        let professional = profile(UserType::Professional);

        let (c, p) = orient_pair(&client, &professional).unwrap();
        assert_eq!(c.id, client.id);
        assert_eq!(p.id, professional.id);

        let (c, p) = orient_pair(&professional, &client).unwrap();
        assert_eq!(c.id, client.id);
        assert_eq!(p.id, professional.id);
    }

    #[test]
    fn orient_pair_rejects_same_role_and_admin_pairs() {
        let a = profile(UserType::Professional);
        let b = profile(UserType::Professional);
        assert!(orient_pair(&a, &b).is_none());

        let admin = profile(UserType::Admin);
        let client = profile(UserType::Client);
        assert!(orient_pair(&admin, &client).is_none());
    }

    #[test]
    fn other_party_flips_between_the_two_ids() {
        let conversation = Model {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            professional_id: Uuid::new_v4(),
            demand_id: None,
            created_at: Utc::now(),
        };

        assert_eq!(
            conversation.other_party(conversation.client_id),
            conversation.professional_id
        );
        assert_eq!(
            conversation.other_party(conversation.professional_id),
            conversation.client_id
        );
        assert!(conversation.has_party(conversation.client_id));
        assert!(!conversation.has_party(Uuid::new_v4()));
    }
}
