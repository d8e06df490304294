use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CustomerBought::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CustomerBought::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CustomerBought::WeightType)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CustomerBought::UnitPrice).double().not_null())
                    .col(ColumnDef::new(CustomerBought::TotalPrice).double().not_null())
                    .col(
                        ColumnDef::new(CustomerBought::DeliveryDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CustomerBought::Remarks).string())
                    .col(
                        ColumnDef::new(CustomerBought::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CustomerBought::TotalWeight).integer().not_null())
                    .col(
                        ColumnDef::new(CustomerBought::ProductTypeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CustomerBought::CustomerId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_customer_bought_product_type_id")
                            .from(CustomerBought::Table, CustomerBought::ProductTypeId)
                            .to(ProductType::Table, ProductType::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_customer_bought_customer_id")
                            .from(CustomerBought::Table, CustomerBought::CustomerId)
                            .to(Customer::Table, Customer::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_customer_bought_product_type_id")
                    .table(CustomerBought::Table)
                    .col(CustomerBought::ProductTypeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_customer_bought_customer_id")
                    .table(CustomerBought::Table)
                    .col(CustomerBought::CustomerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CustomerBought::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CustomerBought {
    Table,
    Id,
    WeightType,
    UnitPrice,
    TotalPrice,
    DeliveryDate,
    Remarks,
    Status,
    TotalWeight,
    ProductTypeId,
    CustomerId,
}

#[derive(DeriveIden)]
enum ProductType {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Customer {
    Table,
    Id,
}
