use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: String,
    pub priority_id: i32,
    pub category_id: i32,
    pub submitter_id: Option<i32>,
    pub assigned_agent_id: Option<i32>,
    /// Display form of the canonical status ("New", "In Progress", ...)
    pub status: String,
    pub comment: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub resolved_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::priorities::Entity",
        from = "Column::PriorityId",
        to = "super::priorities::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Priorities,
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Categories,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::SubmitterId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Submitter,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::AssignedAgentId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    AssignedAgent,
}

impl Related<super::priorities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Priorities.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
