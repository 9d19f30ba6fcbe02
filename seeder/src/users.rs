use anyhow::Result;
use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use fake::{
    Fake,
    faker::name::en::Name,
    rand::SeedableRng,
    rand::seq::IndexedRandom,
};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, Set};
use skillbridge_backend::entities::user::{self, Role, StringList};
use uuid::Uuid;

const DOMAIN_POOL: &[&str] = &[
    "Web Development",
    "Data Science",
    "Cloud",
    "Mobile",
    "Security",
    "DevOps",
];

const SKILL_POOL: &[&str] = &[
    "Python", "Rust", "SQL", "React", "Kubernetes", "AWS", "Linux", "Go",
];

const INTEREST_POOL: &[&str] = &[
    "AI", "Open Source", "Startups", "Teaching", "Design", "Data",
];

/// Configuration for user seeding
pub struct UserSeedConfig {
    /// Number of students to generate
    pub num_students: usize,
    /// Number of mentors to generate
    pub num_mentors: usize,
    /// Random seed for reproducibility
    pub seed: u64,
}

/// Seed students and mentors with a shared development password.
///
/// Every generated account logs in with `password123`.
pub async fn seed_users(db: &DatabaseConnection, config: UserSeedConfig) -> Result<Vec<String>> {
    let mut rng = fake::rand::rngs::StdRng::seed_from_u64(config.seed);

    // One hash shared across all seeded accounts; hashing per user is slow.
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(b"password123", &salt)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {e}"))?
        .to_string();

    let mut emails = Vec::with_capacity(config.num_students + config.num_mentors);
    let mut models = Vec::with_capacity(config.num_students + config.num_mentors);
    let now = Utc::now();

    for i in 0..config.num_students {
        let name: String = Name().fake_with_rng(&mut rng);
        let email = format!("student{}@example.com", i + 1);
        emails.push(email.clone());
        models.push(user::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            email: Set(email),
            password_hash: Set(password_hash.clone()),
            role: Set(Role::Student),
            domains: Set(pick_tags(DOMAIN_POOL, 2, &mut rng)),
            skills: Set(pick_tags(SKILL_POOL, 3, &mut rng)),
            interests: Set(pick_tags(INTEREST_POOL, 2, &mut rng)),
            career_goal: Set(None),
            points: Set(0),
            badges: Set(StringList::default()),
            expertise: Set(StringList::default()),
            experience_years: Set(0),
            available: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        });
    }

    for i in 0..config.num_mentors {
        let name: String = Name().fake_with_rng(&mut rng);
        let email = format!("mentor{}@example.com", i + 1);
        emails.push(email.clone());
        models.push(user::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            email: Set(email),
            password_hash: Set(password_hash.clone()),
            role: Set(Role::Mentor),
            domains: Set(StringList::default()),
            skills: Set(StringList::default()),
            interests: Set(StringList::default()),
            career_goal: Set(None),
            points: Set(0),
            badges: Set(StringList::default()),
            expertise: Set(pick_tags(SKILL_POOL, 3, &mut rng)),
            experience_years: Set((2..15).fake_with_rng(&mut rng)),
            available: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        });
    }

    if !models.is_empty() {
        user::Entity::insert_many(models).exec(db).await?;
    }

    let count = user::Entity::find().count(db).await?;
    println!("Seeding complete. Total users in database: {count}");

    Ok(emails)
}

fn pick_tags<R: fake::rand::Rng + Sized>(pool: &[&str], n: usize, rng: &mut R) -> StringList {
    let picked: Vec<String> = pool
        .choose_multiple(rng, n.min(pool.len()))
        .map(|s| s.to_string())
        .collect();
    StringList(picked)
}
