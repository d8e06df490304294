//! Database migrations for purchases service

use sea_orm_migration::prelude::*;

mod m20210701_000001_create_product_type;
mod m20210701_000002_create_customer;
mod m20210701_000003_create_customer_bought;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20210701_000001_create_product_type::Migration),
            Box::new(m20210701_000002_create_customer::Migration),
            Box::new(m20210701_000003_create_customer_bought::Migration),
        ]
    }
}
