use anyhow::Result;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use skillbridge_backend::entities::community::{self, MemberList, PostList};
use skillbridge_backend::entities::learning_resource;
use skillbridge_backend::entities::quiz::{self, Difficulty, Question, QuestionList};
use skillbridge_backend::entities::user::{self, Role, StringList};
use uuid::Uuid;

/// Configuration for content seeding
pub struct ContentSeedConfig {
    /// Skip quiz creation when no mentor account exists
    pub require_mentor: bool,
}

/// Seed sample quizzes, communities and learning resources.
///
/// Quizzes are attributed to the first mentor account found.
pub async fn seed_content(db: &DatabaseConnection, config: ContentSeedConfig) -> Result<()> {
    let mentor = user::Entity::find()
        .filter(user::Column::Role.eq(Role::Mentor))
        .one(db)
        .await?;

    let creator_id = match &mentor {
        Some(mentor) => mentor.id,
        None if config.require_mentor => {
            anyhow::bail!("no mentor account found; seed users first")
        }
        None => {
            println!("No mentor account found, skipping quizzes");
            Uuid::new_v4()
        }
    };

    if mentor.is_some() {
        seed_quizzes(db, creator_id).await?;
    }

    seed_communities(db, creator_id).await?;
    seed_resources(db).await?;

    Ok(())
}

async fn seed_quizzes(db: &DatabaseConnection, mentor_id: Uuid) -> Result<()> {
    let quizzes = [
        (
            "Python Basics",
            Difficulty::Easy,
            vec![
                question(
                    "Which keyword defines a function in Python?",
                    &["func", "def", "fn", "lambda"],
                    1,
                ),
                question(
                    "What does len([1, 2, 3]) return?",
                    &["2", "3", "4", "error"],
                    1,
                ),
            ],
        ),
        (
            "SQL Joins",
            Difficulty::Medium,
            vec![
                question(
                    "Which join returns only matching rows from both tables?",
                    &["LEFT JOIN", "FULL JOIN", "INNER JOIN", "CROSS JOIN"],
                    2,
                ),
                question(
                    "Which clause filters rows after aggregation?",
                    &["WHERE", "HAVING", "GROUP BY", "ORDER BY"],
                    1,
                ),
            ],
        ),
        (
            "Distributed Systems",
            Difficulty::Hard,
            vec![
                question(
                    "Which property does the CAP theorem say must be sacrificed during a partition?",
                    &["Consistency or availability", "Durability", "Isolation", "Atomicity"],
                    0,
                ),
                question(
                    "What does a quorum of N/2 + 1 guarantee?",
                    &["Total ordering", "Overlapping majorities", "Zero latency", "Exactly-once delivery"],
                    1,
                ),
            ],
        ),
    ];

    for (title, difficulty, questions) in quizzes {
        let count = questions.len();
        quiz::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(title.to_string()),
            difficulty: Set(difficulty),
            questions: Set(QuestionList(questions)),
            points: Set(difficulty.point_value()),
            time_limit: Set(difficulty.time_limit(count)),
            created_by: Set(mentor_id),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await?;
    }

    println!("Seeded 3 quizzes");
    Ok(())
}

async fn seed_communities(db: &DatabaseConnection, creator_id: Uuid) -> Result<()> {
    let communities = [
        ("Rustaceans", "Systems programming", &["Rust", "Linux", "Open Source"][..]),
        ("Data Guild", "Data careers", &["Data", "Python", "SQL"][..]),
        ("Cloud Natives", "Cloud infrastructure", &["AWS", "Kubernetes", "DevOps"][..]),
    ];

    for (name, topic, tags) in communities {
        community::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            topic: Set(topic.to_string()),
            tags: Set(StringList(tags.iter().map(|t| t.to_string()).collect())),
            members: Set(MemberList::default()),
            posts: Set(PostList::default()),
            created_by: Set(creator_id),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await?;
    }

    println!("Seeded 3 communities");
    Ok(())
}

async fn seed_resources(db: &DatabaseConnection) -> Result<()> {
    let resources = [
        (
            "The Rust Book",
            "Rust",
            "beginner",
            "book",
            "https://doc.rust-lang.org/book/",
            &["Rust", "Open Source"][..],
        ),
        (
            "SQL Performance Explained",
            "SQL",
            "intermediate",
            "book",
            "https://use-the-index-luke.com/",
            &["SQL", "Data"][..],
        ),
        (
            "Kubernetes the Hard Way",
            "Kubernetes",
            "advanced",
            "tutorial",
            "https://github.com/kelseyhightower/kubernetes-the-hard-way",
            &["Kubernetes", "DevOps"][..],
        ),
    ];

    for (title, topic, level, kind, url, tags) in resources {
        learning_resource::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(title.to_string()),
            topic: Set(topic.to_string()),
            skill_level: Set(level.to_string()),
            resource_type: Set(kind.to_string()),
            url: Set(url.to_string()),
            tags: Set(StringList(tags.iter().map(|t| t.to_string()).collect())),
            views: Set(0),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await?;
    }

    println!("Seeded 3 learning resources");
    Ok(())
}

fn question(text: &str, options: &[&str], correct: usize) -> Question {
    Question {
        question: text.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer: options[correct].to_string(),
    }
}
