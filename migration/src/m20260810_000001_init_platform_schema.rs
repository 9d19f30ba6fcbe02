use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==========================================
        // 1. Users (all three roles share one table)
        // ==========================================
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(uuid(User::Id).primary_key())
                    .col(string(User::Name).not_null())
                    .col(string(User::Email).not_null().unique_key())
                    .col(string(User::PasswordHash).not_null())
                    .col(string(User::Role).not_null())
                    .col(json(User::Domains).not_null())
                    .col(json(User::Skills).not_null())
                    .col(json(User::Interests).not_null())
                    .col(string_null(User::CareerGoal))
                    .col(integer(User::Points).not_null().default(0))
                    .col(json(User::Badges).not_null())
                    .col(json(User::Expertise).not_null())
                    .col(integer(User::ExperienceYears).not_null().default(0))
                    .col(boolean(User::Available).not_null().default(true))
                    .col(timestamp(User::CreatedAt).not_null())
                    .col(timestamp(User::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await?;

        // ==========================================
        // 2. Quizzes and attempts
        // ==========================================
        manager
            .create_table(
                Table::create()
                    .table(Quiz::Table)
                    .if_not_exists()
                    .col(uuid(Quiz::Id).primary_key())
                    .col(string(Quiz::Title).not_null())
                    .col(string(Quiz::Difficulty).not_null())
                    .col(json(Quiz::Questions).not_null())
                    .col(integer(Quiz::Points).not_null())
                    .col(integer(Quiz::TimeLimit).not_null())
                    .col(uuid(Quiz::CreatedBy).not_null())
                    .col(timestamp(Quiz::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-quiz-created-by")
                            .from(Quiz::Table, Quiz::CreatedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(QuizAttempt::Table)
                    .if_not_exists()
                    .col(uuid(QuizAttempt::Id).primary_key())
                    .col(uuid(QuizAttempt::UserId).not_null())
                    .col(uuid(QuizAttempt::QuizId).not_null())
                    .col(json(QuizAttempt::Answers).not_null())
                    .col(integer(QuizAttempt::CorrectAnswers).not_null())
                    .col(integer(QuizAttempt::TotalQuestions).not_null())
                    .col(double(QuizAttempt::ScorePercentage).not_null())
                    .col(double(QuizAttempt::TimePenalty).not_null())
                    .col(double(QuizAttempt::TabPenalty).not_null())
                    .col(double(QuizAttempt::FinalScore).not_null())
                    .col(integer(QuizAttempt::PointsEarned).not_null())
                    .col(string(QuizAttempt::NextRecommendedDifficulty).not_null())
                    .col(timestamp(QuizAttempt::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-attempt-user")
                            .from(QuizAttempt::Table, QuizAttempt::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-attempt-quiz")
                            .from(QuizAttempt::Table, QuizAttempt::QuizId)
                            .to(Quiz::Table, Quiz::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-attempt-user-created")
                    .table(QuizAttempt::Table)
                    .col(QuizAttempt::UserId)
                    .col(QuizAttempt::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // ==========================================
        // 3. Communities (posts embedded as JSON)
        // ==========================================
        manager
            .create_table(
                Table::create()
                    .table(Community::Table)
                    .if_not_exists()
                    .col(uuid(Community::Id).primary_key())
                    .col(string(Community::Name).not_null().unique_key())
                    .col(string(Community::Topic).not_null())
                    .col(json(Community::Tags).not_null())
                    .col(json(Community::Members).not_null())
                    .col(json(Community::Posts).not_null())
                    .col(uuid(Community::CreatedBy).not_null())
                    .col(timestamp(Community::CreatedAt).not_null())
                    .to_owned(),
            )
            .await?;

        // ==========================================
        // 4. Mock interviews
        // ==========================================
        manager
            .create_table(
                Table::create()
                    .table(Interview::Table)
                    .if_not_exists()
                    .col(uuid(Interview::Id).primary_key())
                    .col(uuid(Interview::StudentId).not_null())
                    .col(string(Interview::StudentName).not_null())
                    .col(uuid(Interview::MentorId).not_null())
                    .col(string(Interview::MentorName).not_null())
                    .col(timestamp(Interview::ScheduledTime).not_null())
                    .col(string(Interview::Topic).not_null())
                    .col(string(Interview::Difficulty).not_null())
                    .col(string(Interview::Status).not_null())
                    .col(double_null(Interview::Score))
                    .col(string_null(Interview::Feedback))
                    .col(string_null(Interview::Strengths))
                    .col(string_null(Interview::Improvements))
                    .col(timestamp_null(Interview::CompletedAt))
                    .col(timestamp(Interview::CreatedAt).not_null())
                    .col(timestamp(Interview::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-interview-student")
                            .from(Interview::Table, Interview::StudentId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-interview-mentor")
                            .from(Interview::Table, Interview::MentorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==========================================
        // 5. Direct mentor connect sessions
        // ==========================================
        manager
            .create_table(
                Table::create()
                    .table(MentorSession::Table)
                    .if_not_exists()
                    .col(uuid(MentorSession::Id).primary_key())
                    .col(uuid(MentorSession::StudentId).not_null())
                    .col(string(MentorSession::StudentName).not_null())
                    .col(uuid(MentorSession::MentorId).not_null())
                    .col(string(MentorSession::MentorName).not_null())
                    .col(string(MentorSession::CallType).not_null())
                    .col(string(MentorSession::Status).not_null())
                    .col(json(MentorSession::MatchedExpertise).not_null())
                    .col(integer_null(MentorSession::SessionRating))
                    .col(string_null(MentorSession::SessionFeedback))
                    .col(json(MentorSession::KeyTakeaways).not_null())
                    .col(timestamp_null(MentorSession::StartedAt))
                    .col(timestamp_null(MentorSession::CompletedAt))
                    .col(timestamp(MentorSession::CreatedAt).not_null())
                    .col(timestamp(MentorSession::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-session-student")
                            .from(MentorSession::Table, MentorSession::StudentId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-session-mentor")
                            .from(MentorSession::Table, MentorSession::MentorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==========================================
        // 6. Mentor connection requests
        // ==========================================
        manager
            .create_table(
                Table::create()
                    .table(MentorConnection::Table)
                    .if_not_exists()
                    .col(uuid(MentorConnection::Id).primary_key())
                    .col(uuid(MentorConnection::StudentId).not_null())
                    .col(string(MentorConnection::StudentName).not_null())
                    .col(uuid(MentorConnection::MentorId).not_null())
                    .col(string(MentorConnection::MentorName).not_null())
                    .col(string(MentorConnection::Status).not_null())
                    .col(string(MentorConnection::Message).not_null())
                    .col(json(MentorConnection::StudentSkills).not_null())
                    .col(json(MentorConnection::StudentBadges).not_null())
                    .col(timestamp(MentorConnection::CreatedAt).not_null())
                    .col(timestamp_null(MentorConnection::RespondedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-connection-student")
                            .from(MentorConnection::Table, MentorConnection::StudentId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-connection-mentor")
                            .from(MentorConnection::Table, MentorConnection::MentorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==========================================
        // 7. Learning resources
        // ==========================================
        manager
            .create_table(
                Table::create()
                    .table(LearningResource::Table)
                    .if_not_exists()
                    .col(uuid(LearningResource::Id).primary_key())
                    .col(string(LearningResource::Title).not_null())
                    .col(string(LearningResource::Topic).not_null())
                    .col(string(LearningResource::SkillLevel).not_null())
                    .col(string(LearningResource::ResourceType).not_null())
                    .col(string(LearningResource::Url).not_null())
                    .col(json(LearningResource::Tags).not_null())
                    .col(integer(LearningResource::Views).not_null().default(0))
                    .col(timestamp(LearningResource::CreatedAt).not_null())
                    .to_owned(),
            )
            .await?;

        // ==========================================
        // 8. Per-user learning progress
        // ==========================================
        manager
            .create_table(
                Table::create()
                    .table(LearningProgress::Table)
                    .if_not_exists()
                    .col(uuid(LearningProgress::Id).primary_key())
                    .col(uuid(LearningProgress::UserId).not_null())
                    .col(uuid(LearningProgress::ResourceId).not_null())
                    .col(timestamp(LearningProgress::ViewedAt).not_null())
                    .col(boolean(LearningProgress::Completed).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-progress-user")
                            .from(LearningProgress::Table, LearningProgress::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-progress-resource")
                            .from(LearningProgress::Table, LearningProgress::ResourceId)
                            .to(LearningResource::Table, LearningResource::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-progress-user-viewed")
                    .table(LearningProgress::Table)
                    .col(LearningProgress::UserId)
                    .col(LearningProgress::ViewedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LearningProgress::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LearningResource::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MentorConnection::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MentorSession::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Interview::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Community::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(QuizAttempt::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Quiz::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Role,
    Domains,
    Skills,
    Interests,
    CareerGoal,
    Points,
    Badges,
    Expertise,
    ExperienceYears,
    Available,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Quiz {
    Table,
    Id,
    Title,
    Difficulty,
    Questions,
    Points,
    TimeLimit,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum QuizAttempt {
    Table,
    Id,
    UserId,
    QuizId,
    Answers,
    CorrectAnswers,
    TotalQuestions,
    ScorePercentage,
    TimePenalty,
    TabPenalty,
    FinalScore,
    PointsEarned,
    NextRecommendedDifficulty,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Community {
    Table,
    Id,
    Name,
    Topic,
    Tags,
    Members,
    Posts,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Interview {
    Table,
    Id,
    StudentId,
    StudentName,
    MentorId,
    MentorName,
    ScheduledTime,
    Topic,
    Difficulty,
    Status,
    Score,
    Feedback,
    Strengths,
    Improvements,
    CompletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum MentorSession {
    Table,
    Id,
    StudentId,
    StudentName,
    MentorId,
    MentorName,
    CallType,
    Status,
    MatchedExpertise,
    SessionRating,
    SessionFeedback,
    KeyTakeaways,
    StartedAt,
    CompletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum MentorConnection {
    Table,
    Id,
    StudentId,
    StudentName,
    MentorId,
    MentorName,
    Status,
    Message,
    StudentSkills,
    StudentBadges,
    CreatedAt,
    RespondedAt,
}

#[derive(DeriveIden)]
enum LearningResource {
    Table,
    Id,
    Title,
    Topic,
    SkillLevel,
    ResourceType,
    Url,
    Tags,
    Views,
    CreatedAt,
}

#[derive(DeriveIden)]
enum LearningProgress {
    Table,
    Id,
    UserId,
    ResourceId,
    ViewedAt,
    Completed,
}
