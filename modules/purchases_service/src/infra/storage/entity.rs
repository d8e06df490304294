//! SeaORM entities for database tables

/// Product type table entity
pub mod product_type {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "product_type")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,

        pub name: String,
    }

    /// Purchases point at product types, never the other way round
    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Customer table entity.
///
/// Customers are managed elsewhere; the table only backs the purchase
/// foreign key.
pub mod customer {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "customer")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,

        pub name: String,

        pub email: Option<String>,

        pub phone: String,

        pub address: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Customer purchase table entity
pub mod customer_bought {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "customer_bought")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,

        /// Upper-case enum name (LITTRE, KG, GRAM)
        pub weight_type: String,

        pub unit_price: f64,

        pub total_price: f64,

        pub delivery_date: DateTimeWithTimeZone,

        pub remarks: Option<String>,

        /// Upper-case enum name (DUE, PAID)
        pub status: String,

        pub total_weight: i32,

        pub product_type_id: i64,

        pub customer_id: i64,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// Foreign key to product_type
        #[sea_orm(
            belongs_to = "super::product_type::Entity",
            from = "Column::ProductTypeId",
            to = "super::product_type::Column::Id"
        )]
        ProductType,

        /// Foreign key to customer
        #[sea_orm(
            belongs_to = "super::customer::Entity",
            from = "Column::CustomerId",
            to = "super::customer::Column::Id"
        )]
        Customer,
    }

    impl Related<super::product_type::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::ProductType.def()
        }
    }

    impl Related<super::customer::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Customer.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
