use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_operators_table::Migration),
            Box::new(m20240101_000002_create_skus_table::Migration),
            Box::new(m20240101_000003_create_label_versions_table::Migration),
            Box::new(m20240101_000004_create_shipment_batches_table::Migration),
            Box::new(m20240101_000005_create_warehouse_locations_table::Migration),
            Box::new(m20240101_000006_create_inventory_stock_table::Migration),
            Box::new(m20240101_000007_create_stock_transactions_table::Migration),
            Box::new(m20240101_000008_create_inbound_receipts_tables::Migration),
            Box::new(m20240101_000009_create_outbound_executions_table::Migration),
        ]
    }
}

// Migration implementations

mod m20240101_000001_create_operators_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_operators_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Operators::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Operators::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Operators::Username).string().not_null())
                        .col(
                            ColumnDef::new(Operators::FullName)
                                .string()
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(Operators::Email)
                                .string()
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(Operators::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Operators::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_operators_username")
                        .table(Operators::Table)
                        .col(Operators::Username)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Operators::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Operators {
        Table,
        Id,
        Username,
        FullName,
        Email,
        IsActive,
        CreatedAt,
    }
}

mod m20240101_000002_create_skus_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_skus_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Skus::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Skus::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Skus::SkuCode).string().not_null())
                        .col(
                            ColumnDef::new(Skus::ProductName)
                                .string()
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(Skus::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_skus_sku_code")
                        .table(Skus::Table)
                        .col(Skus::SkuCode)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Skus::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Skus {
        Table,
        Id,
        SkuCode,
        ProductName,
        CreatedAt,
    }
}

mod m20240101_000003_create_label_versions_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_label_versions_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(LabelVersions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(LabelVersions::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(LabelVersions::SkuId).uuid().not_null())
                        .col(
                            ColumnDef::new(LabelVersions::VersionNumber)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(LabelVersions::Fnsku)
                                .string()
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(LabelVersions::Upc)
                                .string()
                                .not_null()
                                .default(""),
                        )
                        .col(ColumnDef::new(LabelVersions::CreatedBy).string().not_null())
                        .col(ColumnDef::new(LabelVersions::Checksum).string().not_null())
                        .col(
                            ColumnDef::new(LabelVersions::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_label_versions_sku")
                                .from(LabelVersions::Table, LabelVersions::SkuId)
                                .to(Skus::Table, Skus::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            // The versioning race is resolved here, not in application code:
            // concurrent claims of the same (sku, version) lose on this index.
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_label_versions_sku_version")
                        .table(LabelVersions::Table)
                        .col(LabelVersions::SkuId)
                        .col(LabelVersions::VersionNumber)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(LabelVersions::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum LabelVersions {
        Table,
        Id,
        SkuId,
        VersionNumber,
        Fnsku,
        Upc,
        CreatedBy,
        Checksum,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum Skus {
        Table,
        Id,
    }
}

mod m20240101_000004_create_shipment_batches_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_shipment_batches_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ShipmentBatches::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ShipmentBatches::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ShipmentBatches::BatchCode)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ShipmentBatches::LabelVersionId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ShipmentBatches::Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ShipmentBatches::Status)
                                .string()
                                .not_null()
                                .default("pending"),
                        )
                        .col(ColumnDef::new(ShipmentBatches::CreatedBy).uuid().not_null())
                        .col(ColumnDef::new(ShipmentBatches::Reviewer1Id).uuid().null())
                        .col(
                            ColumnDef::new(ShipmentBatches::Reviewer1Approved)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(ShipmentBatches::Reviewer1Comment)
                                .string()
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(ShipmentBatches::Reviewer1At)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(ColumnDef::new(ShipmentBatches::Reviewer2Id).uuid().null())
                        .col(
                            ColumnDef::new(ShipmentBatches::Reviewer2Approved)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(ShipmentBatches::Reviewer2Comment)
                                .string()
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(ShipmentBatches::Reviewer2At)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ShipmentBatches::Version)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .col(
                            ColumnDef::new(ShipmentBatches::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_shipment_batches_label_version")
                                .from(ShipmentBatches::Table, ShipmentBatches::LabelVersionId)
                                .to(LabelVersions::Table, LabelVersions::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_shipment_batches_batch_code")
                        .table(ShipmentBatches::Table)
                        .col(ShipmentBatches::BatchCode)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_shipment_batches_status")
                        .table(ShipmentBatches::Table)
                        .col(ShipmentBatches::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ShipmentBatches::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum ShipmentBatches {
        Table,
        Id,
        BatchCode,
        LabelVersionId,
        Quantity,
        Status,
        CreatedBy,
        Reviewer1Id,
        Reviewer1Approved,
        Reviewer1Comment,
        Reviewer1At,
        Reviewer2Id,
        Reviewer2Approved,
        Reviewer2Comment,
        Reviewer2At,
        Version,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum LabelVersions {
        Table,
        Id,
    }
}

mod m20240101_000005_create_warehouse_locations_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_warehouse_locations_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(WarehouseLocations::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(WarehouseLocations::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(WarehouseLocations::Code).string().not_null())
                        .col(
                            ColumnDef::new(WarehouseLocations::Name)
                                .string()
                                .not_null()
                                .default(""),
                        )
                        .col(ColumnDef::new(WarehouseLocations::Kind).string().not_null())
                        .col(
                            ColumnDef::new(WarehouseLocations::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(WarehouseLocations::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_warehouse_locations_code")
                        .table(WarehouseLocations::Table)
                        .col(WarehouseLocations::Code)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(WarehouseLocations::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum WarehouseLocations {
        Table,
        Id,
        Code,
        Name,
        Kind,
        IsActive,
        CreatedAt,
    }
}

mod m20240101_000006_create_inventory_stock_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000006_create_inventory_stock_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(InventoryStock::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InventoryStock::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryStock::LocationId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryStock::LabelVersionId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryStock::Quantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InventoryStock::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryStock::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inventory_stock_location")
                                .from(InventoryStock::Table, InventoryStock::LocationId)
                                .to(WarehouseLocations::Table, WarehouseLocations::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inventory_stock_label_version")
                                .from(InventoryStock::Table, InventoryStock::LabelVersionId)
                                .to(LabelVersions::Table, LabelVersions::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_stock_location_label")
                        .table(InventoryStock::Table)
                        .col(InventoryStock::LocationId)
                        .col(InventoryStock::LabelVersionId)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InventoryStock::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum InventoryStock {
        Table,
        Id,
        LocationId,
        LabelVersionId,
        Quantity,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum WarehouseLocations {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum LabelVersions {
        Table,
        Id,
    }
}

mod m20240101_000007_create_stock_transactions_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000007_create_stock_transactions_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(StockTransactions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StockTransactions::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockTransactions::TxnType)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StockTransactions::SkuId).uuid().not_null())
                        .col(
                            ColumnDef::new(StockTransactions::LabelVersionId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockTransactions::LocationId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockTransactions::QuantityChange)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockTransactions::BalanceAfter)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockTransactions::OperatorId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockTransactions::ReferenceDoc)
                                .string()
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(StockTransactions::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_stock_transactions_label_version")
                                .from(StockTransactions::Table, StockTransactions::LabelVersionId)
                                .to(LabelVersions::Table, LabelVersions::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_stock_transactions_location")
                                .from(StockTransactions::Table, StockTransactions::LocationId)
                                .to(WarehouseLocations::Table, WarehouseLocations::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_stock_transactions_location_label")
                        .table(StockTransactions::Table)
                        .col(StockTransactions::LocationId)
                        .col(StockTransactions::LabelVersionId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_stock_transactions_created_at")
                        .table(StockTransactions::Table)
                        .col(StockTransactions::CreatedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(StockTransactions::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum StockTransactions {
        Table,
        Id,
        TxnType,
        SkuId,
        LabelVersionId,
        LocationId,
        QuantityChange,
        BalanceAfter,
        OperatorId,
        ReferenceDoc,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum LabelVersions {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum WarehouseLocations {
        Table,
        Id,
    }
}

mod m20240101_000008_create_inbound_receipts_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000008_create_inbound_receipts_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(InboundReceipts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InboundReceipts::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InboundReceipts::ReceiptNumber)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InboundReceipts::Status)
                                .string()
                                .not_null()
                                .default("open"),
                        )
                        .col(ColumnDef::new(InboundReceipts::CreatedBy).uuid().not_null())
                        .col(
                            ColumnDef::new(InboundReceipts::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InboundReceipts::PostedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inbound_receipts_receipt_number")
                        .table(InboundReceipts::Table)
                        .col(InboundReceipts::ReceiptNumber)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(InboundLineItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InboundLineItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InboundLineItems::ReceiptId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InboundLineItems::LabelVersionId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InboundLineItems::LocationId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InboundLineItems::ExpectedQuantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InboundLineItems::ScannedQuantity)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(InboundLineItems::ScannedChecksum)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(InboundLineItems::ScanMatched)
                                .boolean()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(InboundLineItems::ScannedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(InboundLineItems::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inbound_line_items_receipt")
                                .from(InboundLineItems::Table, InboundLineItems::ReceiptId)
                                .to(InboundReceipts::Table, InboundReceipts::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inbound_line_items_label_version")
                                .from(InboundLineItems::Table, InboundLineItems::LabelVersionId)
                                .to(LabelVersions::Table, LabelVersions::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inbound_line_items_receipt_id")
                        .table(InboundLineItems::Table)
                        .col(InboundLineItems::ReceiptId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InboundLineItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(InboundReceipts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum InboundReceipts {
        Table,
        Id,
        ReceiptNumber,
        Status,
        CreatedBy,
        CreatedAt,
        PostedAt,
    }

    #[derive(DeriveIden)]
    enum InboundLineItems {
        Table,
        Id,
        ReceiptId,
        LabelVersionId,
        LocationId,
        ExpectedQuantity,
        ScannedQuantity,
        ScannedChecksum,
        ScanMatched,
        ScannedAt,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum LabelVersions {
        Table,
        Id,
    }
}

mod m20240101_000009_create_outbound_executions_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000009_create_outbound_executions_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(OutboundExecutions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OutboundExecutions::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OutboundExecutions::BatchId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OutboundExecutions::LocationId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OutboundExecutions::Status)
                                .string()
                                .not_null()
                                .default("pending"),
                        )
                        .col(
                            ColumnDef::new(OutboundExecutions::TrackingNumber)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(OutboundExecutions::CreatedBy)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OutboundExecutions::ShippedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(OutboundExecutions::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_outbound_executions_batch")
                                .from(OutboundExecutions::Table, OutboundExecutions::BatchId)
                                .to(ShipmentBatches::Table, ShipmentBatches::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            // One execution per batch.
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_outbound_executions_batch_id")
                        .table(OutboundExecutions::Table)
                        .col(OutboundExecutions::BatchId)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OutboundExecutions::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum OutboundExecutions {
        Table,
        Id,
        BatchId,
        LocationId,
        Status,
        TrackingNumber,
        CreatedBy,
        ShippedAt,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum ShipmentBatches {
        Table,
        Id,
    }
}
