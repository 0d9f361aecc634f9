#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
use sqlx::PgPool;

#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
pub fn create_test_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "test-sub".to_string(),
        user_id: Some("1".to_string()),
        roles: vec!["organizer".to_string()],
    }
}

#[cfg(test)]
async fn inject_test_user_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_test_user());
    next.run(request).await
}

/// Wrap a router so every request arrives authenticated, bypassing JWT checks
#[cfg(test)]
pub fn with_test_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_test_user_middleware))
}

// ==================== Database Seeds ====================

#[cfg(test)]
pub async fn seed_genre(pool: &PgPool) -> Uuid {
    let category_id = Uuid::now_v7();
    sqlx::query("INSERT INTO categories (id, name) VALUES ($1, 'Music')")
        .bind(category_id)
        .execute(pool)
        .await
        .unwrap();

    let genre_id = Uuid::now_v7();
    sqlx::query("INSERT INTO genres (id, name, category_id) VALUES ($1, 'Jazz', $2)")
        .bind(genre_id)
        .bind(category_id)
        .execute(pool)
        .await
        .unwrap();
    genre_id
}

#[cfg(test)]
pub async fn seed_user(pool: &PgPool) -> Uuid {
    let user_id = Uuid::now_v7();
    sqlx::query(
        "INSERT INTO users (id, first_name, last_name, password_hash, email) \
         VALUES ($1, 'Test', 'User', 'x', 'test@example.com')",
    )
    .bind(user_id)
    .execute(pool)
    .await
    .unwrap();
    user_id
}

#[cfg(test)]
pub async fn seed_organizer(pool: &PgPool) -> Uuid {
    let user_id = seed_user(pool).await;
    let organizer_id = Uuid::now_v7();
    sqlx::query(
        "INSERT INTO organizers (id, name, logo, card_number, card_holder_name, user_id) \
         VALUES ($1, 'Org', 'logo.png', '4111111111111111', 'TEST USER', $2)",
    )
    .bind(organizer_id)
    .bind(user_id)
    .execute(pool)
    .await
    .unwrap();
    organizer_id
}

/// A bare event with no dates or venues
#[cfg(test)]
pub async fn seed_event(pool: &PgPool) -> Uuid {
    let genre_id = seed_genre(pool).await;
    let organizer_id = seed_organizer(pool).await;
    let event_id = Uuid::now_v7();
    sqlx::query(
        "INSERT INTO events (id, name, description, expected_amount, recommended_donation, \
         validate_status, count_of_members, status, concession, genre_id, organizer_id) \
         VALUES ($1, 'Seeded', 'Seeded event', 100, 5, 'OPTIONAL', 10, 'ACTIVE', 'none', $2, $3)",
    )
    .bind(event_id)
    .bind(genre_id)
    .bind(organizer_id)
    .execute(pool)
    .await
    .unwrap();
    event_id
}

#[cfg(test)]
pub async fn seed_booking(pool: &PgPool, event_id: Uuid) {
    let user_id = seed_user(pool).await;
    sqlx::query("INSERT INTO bookings (id, event_id, user_id) VALUES ($1, $2, $3)")
        .bind(Uuid::now_v7())
        .bind(event_id)
        .bind(user_id)
        .execute(pool)
        .await
        .unwrap();
}

#[cfg(test)]
pub async fn seed_feedback(pool: &PgPool, event_id: Uuid, rate: i32) {
    let user_id = seed_user(pool).await;
    sqlx::query(
        "INSERT INTO feedback (id, rate, date_time, event_id, user_id) \
         VALUES ($1, $2, NOW(), $3, $4)",
    )
    .bind(Uuid::now_v7())
    .bind(rate)
    .bind(event_id)
    .bind(user_id)
    .execute(pool)
    .await
    .unwrap();
}
