use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_services_table::Migration),
            Box::new(m20240101_000002_create_stylists_table::Migration),
            Box::new(m20240101_000003_create_appointments_table::Migration),
            Box::new(m20240101_000004_create_queue_entries_table::Migration),
        ]
    }
}

// Migration implementations

mod m20240101_000001_create_services_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_services_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Services::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Services::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Services::Name).string().not_null())
                        .col(ColumnDef::new(Services::Duration).string().not_null())
                        .col(
                            ColumnDef::new(Services::Price)
                                .decimal_len(10, 2)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Services::Description).text().null())
                        .col(
                            ColumnDef::new(Services::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Services::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Services {
        Table,
        Id,
        Name,
        Duration,
        Price,
        Description,
        IsActive,
    }
}

mod m20240101_000002_create_stylists_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_stylists_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Stylists::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Stylists::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Stylists::Name).string().not_null())
                        .col(
                            ColumnDef::new(Stylists::Mobile)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Stylists::PasswordHash).string().not_null())
                        .col(
                            ColumnDef::new(Stylists::Status)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Stylists::ImageUrl).string().null())
                        .col(ColumnDef::new(Stylists::Specialty).string().null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Stylists::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Stylists {
        Table,
        Id,
        Name,
        Mobile,
        PasswordHash,
        Status,
        ImageUrl,
        Specialty,
    }
}

mod m20240101_000003_create_appointments_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_appointments_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Appointments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Appointments::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Appointments::CustomerName)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Appointments::Mobile).string().not_null())
                        .col(
                            ColumnDef::new(Appointments::AppointmentDate)
                                .date()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Appointments::AppointmentTime)
                                .time()
                                .not_null(),
                        )
                        // Validated by lookup at creation time; deliberately no
                        // foreign-key constraint so catalog deletes may dangle.
                        .col(
                            ColumnDef::new(Appointments::ServiceId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Appointments::Status)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Appointments::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Appointments::UpdatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_appointments_date")
                        .table(Appointments::Table)
                        .col(Appointments::AppointmentDate)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_appointments_mobile")
                        .table(Appointments::Table)
                        .col(Appointments::Mobile)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Appointments::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Appointments {
        Table,
        Id,
        CustomerName,
        Mobile,
        AppointmentDate,
        AppointmentTime,
        ServiceId,
        Status,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000004_create_queue_entries_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_queue_entries_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(QueueEntries::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(QueueEntries::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QueueEntries::CustomerName)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(QueueEntries::Mobile).string().not_null())
                        .col(
                            ColumnDef::new(QueueEntries::Type)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QueueEntries::Status)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QueueEntries::JoinedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(ColumnDef::new(QueueEntries::StartedAt).timestamp().null())
                        .col(
                            ColumnDef::new(QueueEntries::CompletedAt)
                                .timestamp()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(QueueEntries::EstimatedWaitTime)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(QueueEntries::ServiceId)
                                .big_integer()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_queue_entries_status")
                        .table(QueueEntries::Table)
                        .col(QueueEntries::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_queue_entries_joined_at")
                        .table(QueueEntries::Table)
                        .col(QueueEntries::JoinedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(QueueEntries::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum QueueEntries {
        Table,
        Id,
        CustomerName,
        Mobile,
        Type,
        Status,
        JoinedAt,
        StartedAt,
        CompletedAt,
        EstimatedWaitTime,
        ServiceId,
    }
}
