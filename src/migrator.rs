use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_customers_table::Migration),
            Box::new(m20250301_000002_create_services_table::Migration),
            Box::new(m20250301_000003_create_project_leaders_table::Migration),
            Box::new(m20250301_000004_create_projects_table::Migration),
            Box::new(m20250301_000005_create_orders_table::Migration),
            Box::new(m20250301_000006_create_summaries_table::Migration),
        ]
    }
}

// Migration implementations

mod m20250301_000001_create_customers_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000001_create_customers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Customers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Customers::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Customers::CustomerName).string().not_null())
                        .col(
                            ColumnDef::new(Customers::OrganizationNumber)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Customers::Address).string().null())
                        .col(ColumnDef::new(Customers::Discount).decimal_len(10, 2).null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Customers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Customers {
        Table,
        Id,
        CustomerName,
        OrganizationNumber,
        Address,
        Discount,
    }
}

mod m20250301_000002_create_services_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000002_create_services_table"
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
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Services::ServiceName).string().not_null())
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

    #[derive(DeriveIden)]
    pub enum Services {
        Table,
        Id,
        ServiceName,
    }
}

mod m20250301_000003_create_project_leaders_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000003_create_project_leaders_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ProjectLeaders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProjectLeaders::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(ProjectLeaders::FirstName)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ProjectLeaders::LastName).string().not_null())
                        .col(ColumnDef::new(ProjectLeaders::Email).string().not_null())
                        .col(ColumnDef::new(ProjectLeaders::Phone).string().null())
                        .col(ColumnDef::new(ProjectLeaders::Department).string().null())
                        .col(
                            ColumnDef::new(ProjectLeaders::IsDeleted)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .to_owned(),
                )
                .await?;

            // Seed the sentinel row that soft-deleted leaders hand their
            // projects to. Explicit negative id keeps it out of the
            // auto-increment range.
            let seed = Query::insert()
                .into_table(ProjectLeaders::Table)
                .columns([
                    ProjectLeaders::Id,
                    ProjectLeaders::FirstName,
                    ProjectLeaders::LastName,
                    ProjectLeaders::Email,
                    ProjectLeaders::IsDeleted,
                ])
                .values_panic([
                    crate::entities::project_leader::UNASSIGNED_LEADER_ID.into(),
                    "Unassigned".into(),
                    "".into(),
                    "unassigned@localhost".into(),
                    false.into(),
                ])
                .to_owned();
            manager.exec_stmt(seed).await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProjectLeaders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum ProjectLeaders {
        Table,
        Id,
        FirstName,
        LastName,
        Email,
        Phone,
        Department,
        IsDeleted,
    }
}

mod m20250301_000004_create_projects_table {

    use sea_orm_migration::prelude::*;

    use super::m20250301_000003_create_project_leaders_table::ProjectLeaders;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000004_create_projects_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Projects::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Projects::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Projects::ProjectNumber)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Projects::Description).string().null())
                        .col(ColumnDef::new(Projects::StartDate).date().not_null())
                        .col(ColumnDef::new(Projects::EndDate).date().null())
                        .col(ColumnDef::new(Projects::Status).string().not_null())
                        .col(
                            ColumnDef::new(Projects::ProjectLeaderId)
                                .integer()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_projects_project_leader")
                                .from(Projects::Table, Projects::ProjectLeaderId)
                                .to(ProjectLeaders::Table, ProjectLeaders::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Projects::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Projects {
        Table,
        Id,
        ProjectNumber,
        Description,
        StartDate,
        EndDate,
        Status,
        ProjectLeaderId,
    }
}

mod m20250301_000005_create_orders_table {

    use sea_orm_migration::prelude::*;

    use super::m20250301_000001_create_customers_table::Customers;
    use super::m20250301_000002_create_services_table::Services;
    use super::m20250301_000004_create_projects_table::Projects;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000005_create_orders_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Orders::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Orders::ProjectId).integer().not_null())
                        .col(ColumnDef::new(Orders::CustomerId).integer().not_null())
                        .col(ColumnDef::new(Orders::ServiceId).integer().not_null())
                        .col(
                            ColumnDef::new(Orders::Hours)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Orders::Price)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .primary_key(
                            Index::create()
                                .col(Orders::ProjectId)
                                .col(Orders::CustomerId)
                                .col(Orders::ServiceId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_project")
                                .from(Orders::Table, Orders::ProjectId)
                                .to(Projects::Table, Projects::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_customer")
                                .from(Orders::Table, Orders::CustomerId)
                                .to(Customers::Table, Customers::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_service")
                                .from(Orders::Table, Orders::ServiceId)
                                .to(Services::Table, Services::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Orders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Orders {
        Table,
        ProjectId,
        CustomerId,
        ServiceId,
        Hours,
        Price,
    }
}

mod m20250301_000006_create_summaries_table {

    use sea_orm_migration::prelude::*;

    use super::m20250301_000004_create_projects_table::Projects;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000006_create_summaries_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Summaries::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Summaries::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Summaries::ProjectId)
                                .integer()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(Summaries::TotalHours)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Summaries::TotalPrice)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Summaries::Notes).string().null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_summaries_project")
                                .from(Summaries::Table, Summaries::ProjectId)
                                .to(Projects::Table, Projects::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Summaries::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Summaries {
        Table,
        Id,
        ProjectId,
        TotalHours,
        TotalPrice,
        Notes,
    }
}
