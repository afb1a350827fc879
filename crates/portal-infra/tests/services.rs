//! Core services wired to the in-memory repositories and the real
//! Argon2/JWT implementations.

#![cfg(feature = "auth")]

use std::sync::Arc;

use portal_core::DomainError;
use portal_core::domain::{Post, PostDraft, PostType, User};
use portal_core::ports::{AuthError, BaseRepository, TokenService, UserRepository};
use portal_core::services::{AuthService, EngagementService, Registration, StatsService};
use portal_infra::{
    Argon2PasswordService, InMemoryLikeRepository, InMemoryPostRepository, InMemoryUserRepository,
    InMemoryWaitlistRepository, JwtConfig, JwtTokenService,
};
use uuid::Uuid;

struct Harness {
    users: Arc<InMemoryUserRepository>,
    waitlist: Arc<InMemoryWaitlistRepository>,
    posts: Arc<InMemoryPostRepository>,
    likes: Arc<InMemoryLikeRepository>,
    tokens: Arc<JwtTokenService>,
    auth: AuthService,
    engagement: EngagementService,
    stats: StatsService,
}

fn harness() -> Harness {
    let users = Arc::new(InMemoryUserRepository::new());
    let waitlist = Arc::new(InMemoryWaitlistRepository::new());
    let posts = Arc::new(InMemoryPostRepository::new());
    let likes = Arc::new(InMemoryLikeRepository::new());
    let tokens = Arc::new(JwtTokenService::new(JwtConfig::new("integration-secret")));

    let auth = AuthService::new(
        users.clone(),
        waitlist.clone(),
        Arc::new(Argon2PasswordService::new()),
        tokens.clone(),
    );
    let engagement = EngagementService::new(posts.clone(), likes.clone());
    let stats = StatsService::new(posts.clone());

    Harness {
        users,
        waitlist,
        posts,
        likes,
        tokens,
        auth,
        engagement,
        stats,
    }
}

fn registration(name: &str) -> Registration {
    Registration {
        email: format!("{name}@example.com"),
        username: name.to_string(),
        full_name: format!("{name} tester"),
        password: "TestPassword123!".to_string(),
        bio: None,
    }
}

async fn seed_post(h: &Harness, author: &User, likes: i64, views: i64) -> Post {
    let mut post = Post::new(
        author,
        PostDraft {
            title: "Seed".to_string(),
            content: "seed content".to_string(),
            post_type: PostType::Blog,
            tags: Vec::new(),
            summary: None,
        },
    );
    post.likes = likes;
    post.views = views;
    h.posts.insert(post).await.unwrap()
}

#[tokio::test]
async fn register_issues_token_for_created_user() {
    let h = harness();

    let session = h.auth.register(registration("ada")).await.unwrap();

    let claims = h.tokens.validate_token(&session.token).unwrap();
    assert_eq!(claims.user_id, session.user.id);

    let resolved = h.auth.authenticate(&session.token).await.unwrap();
    assert_eq!(resolved.id, session.user.id);
    assert_eq!(resolved.email, "ada@example.com");
    assert_eq!(h.waitlist.len().await, 1);
}

#[tokio::test]
async fn duplicate_registration_leaves_store_unchanged() {
    let h = harness();
    let original = h.auth.register(registration("ada")).await.unwrap();

    let mut same_email = registration("grace");
    same_email.email = "ada@example.com".to_string();
    let mut same_username = registration("grace");
    same_username.username = "ada".to_string();

    assert!(matches!(
        h.auth.register(same_email).await,
        Err(DomainError::Duplicate(_))
    ));
    assert!(matches!(
        h.auth.register(same_username).await,
        Err(DomainError::Duplicate(_))
    ));

    let stored = h.users.find_by_email("ada@example.com").await.unwrap().unwrap();
    assert_eq!(stored.id, original.user.id);
    assert_eq!(stored.full_name, "ada tester");
    assert!(h.users.find_by_email("grace@example.com").await.unwrap().is_none());
    assert_eq!(h.waitlist.len().await, 1);
}

#[tokio::test]
async fn registration_rejects_invalid_input() {
    let h = harness();

    let mut bad_email = registration("ada");
    bad_email.email = "not-an-email".to_string();
    let mut short_password = registration("ada");
    short_password.password = "short".to_string();

    assert!(matches!(
        h.auth.register(bad_email).await,
        Err(DomainError::Validation(_))
    ));
    assert!(matches!(
        h.auth.register(short_password).await,
        Err(DomainError::Validation(_))
    ));
    assert!(h.waitlist.is_empty().await);
}

#[tokio::test]
async fn login_accepts_only_the_exact_password() {
    let h = harness();
    h.auth.register(registration("ada")).await.unwrap();

    let session = h
        .auth
        .login("ada@example.com", "TestPassword123!")
        .await
        .unwrap();
    assert!(h.tokens.validate_token(&session.token).is_ok());

    for wrong in ["TestPassword123", "TestPassword123?", "testPassword123!", ""] {
        assert!(matches!(
            h.auth.login("ada@example.com", wrong).await,
            Err(DomainError::Auth(AuthError::InvalidCredentials))
        ));
    }
    assert!(matches!(
        h.auth.login("nobody@example.com", "TestPassword123!").await,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn token_for_missing_user_is_rejected() {
    let h = harness();
    let token = h.tokens.generate_token(Uuid::new_v4()).unwrap();

    assert!(matches!(
        h.auth.authenticate(&token).await,
        Err(DomainError::Auth(AuthError::UnknownUser))
    ));
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let h = harness();

    assert!(matches!(
        h.auth.authenticate("garbage").await,
        Err(DomainError::Auth(AuthError::InvalidToken(_)))
    ));
}

#[tokio::test]
async fn sequential_views_increment_by_one_each() {
    let h = harness();
    let author = h.auth.register(registration("ada")).await.unwrap().user;
    let post = seed_post(&h, &author, 0, 5).await;

    let mut last = post.views;
    for _ in 0..4 {
        let viewed = h.engagement.view_post(post.id).await.unwrap();
        assert_eq!(viewed.views, last + 1);
        last = viewed.views;
    }
    assert_eq!(last, 9);
}

#[tokio::test]
async fn viewing_missing_post_is_not_found() {
    let h = harness();

    assert!(matches!(
        h.engagement.view_post(Uuid::new_v4()).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn like_toggle_pair_restores_counter() {
    let h = harness();
    let author = h.auth.register(registration("ada")).await.unwrap().user;
    let reader = h.auth.register(registration("grace")).await.unwrap().user;
    let post = seed_post(&h, &author, 3, 0).await;

    assert!(h.engagement.toggle_like(reader.id, post.id).await.unwrap());
    let liked = h.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(liked.likes, 4);
    assert_eq!(h.likes.count_for_post(post.id).await, 1);

    assert!(!h.engagement.toggle_like(reader.id, post.id).await.unwrap());
    let unliked = h.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(unliked.likes, 3);
    assert_eq!(h.likes.count_for_post(post.id).await, 0);
}

#[tokio::test]
async fn concurrent_toggles_keep_counter_and_records_in_step() {
    let h = harness();
    let author = h.auth.register(registration("ada")).await.unwrap().user;
    let reader = h.auth.register(registration("grace")).await.unwrap().user;
    let post = seed_post(&h, &author, 0, 0).await;

    let (first, second) = tokio::join!(
        h.engagement.toggle_like(reader.id, post.id),
        h.engagement.toggle_like(reader.id, post.id),
    );
    first.unwrap();
    second.unwrap();

    let stored = h.posts.find_by_id(post.id).await.unwrap().unwrap();
    let records = h.likes.count_for_post(post.id).await;
    assert!(records <= 1);
    assert_eq!(stored.likes, i64::try_from(records).unwrap());
}

#[tokio::test]
async fn liking_missing_post_is_not_found_and_records_nothing() {
    let h = harness();
    let reader = h.auth.register(registration("grace")).await.unwrap().user;
    let missing = Uuid::new_v4();

    assert!(matches!(
        h.engagement.toggle_like(reader.id, missing).await,
        Err(DomainError::NotFound { .. })
    ));
    assert_eq!(h.likes.count_for_post(missing).await, 0);
}

#[tokio::test]
async fn stats_for_author_without_posts_are_zero() {
    let h = harness();
    let author = h.auth.register(registration("ada")).await.unwrap().user;

    let stats = h.stats.for_author(author.id).await.unwrap();

    assert_eq!((stats.posts, stats.likes, stats.views), (0, 0, 0));
}

#[tokio::test]
async fn stats_sum_only_the_authors_posts() {
    let h = harness();
    let author = h.auth.register(registration("ada")).await.unwrap().user;
    let other = h.auth.register(registration("grace")).await.unwrap().user;
    seed_post(&h, &author, 2, 10).await;
    seed_post(&h, &author, 5, 0).await;
    seed_post(&h, &other, 100, 100).await;

    let stats = h.stats.for_author(author.id).await.unwrap();

    assert_eq!((stats.posts, stats.likes, stats.views), (2, 7, 10));
}
