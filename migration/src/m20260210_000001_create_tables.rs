use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::ProfileName).string().null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建答辩委员会表
        manager
            .create_table(
                Table::create()
                    .table(DefenseBoards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DefenseBoards::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DefenseBoards::Name).string().not_null())
                    .col(ColumnDef::new(DefenseBoards::Room).string().null())
                    .col(
                        ColumnDef::new(DefenseBoards::ScheduledAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(DefenseBoards::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DefenseBoards::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建委员会成员关联表
        manager
            .create_table(
                Table::create()
                    .table(BoardMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BoardMembers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BoardMembers::BoardId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BoardMembers::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(BoardMembers::Table, BoardMembers::BoardId)
                            .to(DefenseBoards::Table, DefenseBoards::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(BoardMembers::Table, BoardMembers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_board_members_board_user")
                    .table(BoardMembers::Table)
                    .col(BoardMembers::BoardId)
                    .col(BoardMembers::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建开题提案表
        manager
            .create_table(
                Table::create()
                    .table(Proposals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Proposals::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Proposals::Title).string().not_null())
                    .col(ColumnDef::new(Proposals::Abstract).text().null())
                    .col(
                        ColumnDef::new(Proposals::SupervisorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Proposals::CourseSupervisorId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Proposals::DefenseBoardId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Proposals::Status).string().not_null())
                    .col(ColumnDef::new(Proposals::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Proposals::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Proposals::Table, Proposals::SupervisorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Proposals::Table, Proposals::DefenseBoardId)
                            .to(DefenseBoards::Table, DefenseBoards::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建提案成员关联表（学生名册）
        manager
            .create_table(
                Table::create()
                    .table(ProposalMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProposalMembers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProposalMembers::ProposalId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProposalMembers::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProposalMembers::Table, ProposalMembers::ProposalId)
                            .to(Proposals::Table, Proposals::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProposalMembers::Table, ProposalMembers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_proposal_members_proposal_user")
                    .table(ProposalMembers::Table)
                    .col(ProposalMembers::ProposalId)
                    .col(ProposalMembers::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建评价记录表
        manager
            .create_table(
                Table::create()
                    .table(Evaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Evaluations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::EvaluatorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::ProposalId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Evaluations::DefenseType).string().not_null())
                    .col(
                        ColumnDef::new(Evaluations::EvaluationType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Evaluations::Marks).double().not_null())
                    .col(
                        ColumnDef::new(Evaluations::Comments)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Evaluations::Table, Evaluations::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Evaluations::Table, Evaluations::EvaluatorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Evaluations::Table, Evaluations::ProposalId)
                            .to(Proposals::Table, Proposals::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 五元组复合键唯一索引：同一评价者的重复提交原地覆盖，不追加
        manager
            .create_index(
                Index::create()
                    .name("idx_evaluations_composite_key")
                    .table(Evaluations::Table)
                    .col(Evaluations::StudentId)
                    .col(Evaluations::EvaluatorId)
                    .col(Evaluations::ProposalId)
                    .col(Evaluations::DefenseType)
                    .col(Evaluations::EvaluationType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建发布成绩表
        manager
            .create_table(
                Table::create()
                    .table(PublishedResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PublishedResults::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PublishedResults::StudentId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(PublishedResults::ProposalId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PublishedResults::Grade).string().not_null())
                    .col(ColumnDef::new(PublishedResults::Point).double().not_null())
                    .col(
                        ColumnDef::new(PublishedResults::TotalMarks)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PublishedResults::CourseCode)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PublishedResults::CourseTitle)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PublishedResults::PublishedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PublishedResults::Table, PublishedResults::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PublishedResults::Table, PublishedResults::ProposalId)
                            .to(Proposals::Table, Proposals::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PublishedResults::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Evaluations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProposalMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Proposals::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BoardMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DefenseBoards::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
    Status,
    ProfileName,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum DefenseBoards {
    Table,
    Id,
    Name,
    Room,
    ScheduledAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BoardMembers {
    Table,
    Id,
    BoardId,
    UserId,
}

#[derive(DeriveIden)]
enum Proposals {
    Table,
    Id,
    Title,
    Abstract,
    SupervisorId,
    CourseSupervisorId,
    DefenseBoardId,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ProposalMembers {
    Table,
    Id,
    ProposalId,
    UserId,
}

#[derive(DeriveIden)]
enum Evaluations {
    Table,
    Id,
    StudentId,
    EvaluatorId,
    ProposalId,
    DefenseType,
    EvaluationType,
    Marks,
    Comments,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PublishedResults {
    Table,
    Id,
    StudentId,
    ProposalId,
    Grade,
    Point,
    TotalMarks,
    CourseCode,
    CourseTitle,
    PublishedAt,
}
