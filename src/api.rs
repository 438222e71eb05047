use leptos::*;
use crate::models::ranking::{GlobalRankingEntry, UserRankingEntry};

#[cfg(feature = "ssr")]
use actix_web::{web, HttpRequest, HttpResponse};
#[cfg(feature = "ssr")]
use crate::auth::{has_capability, Action, Actor, Resource, Role};
#[cfg(feature = "ssr")]
use crate::db::Database;
#[cfg(feature = "ssr")]
use crate::error::AppError;
#[cfg(feature = "ssr")]
use crate::models::ranking::Rankings;
#[cfg(feature = "ssr")]
use crate::models::restaurant::{NewRestaurant, Restaurant, RestaurantUpdate};
#[cfg(feature = "ssr")]
use crate::models::review::{Review, ReviewInput};
#[cfg(feature = "ssr")]
use crate::ranking::{compute_global_rankings, compute_user_rankings, parse_user_id};
#[cfg(feature = "ssr")]
use crate::rating::{filter_excluded, filter_included, parse_cuisines, top};
#[cfg(feature = "ssr")]
use chrono::Utc;
#[cfg(feature = "ssr")]
use leptos::logging::log;
#[cfg(feature = "ssr")]
use serde::Deserialize;
#[cfg(feature = "ssr")]
use serde_json::json;
#[cfg(feature = "ssr")]
use std::sync::Arc;
#[cfg(feature = "ssr")]
use tokio::sync::Mutex;
#[cfg(feature = "ssr")]
use uuid::Uuid;

#[cfg(feature = "ssr")]
pub type DbData = web::Data<Arc<Mutex<Database>>>;

#[cfg(feature = "ssr")]
pub const USER_ID_HEADER: &str = "X-User-Id";
#[cfg(feature = "ssr")]
pub const USER_ROLE_HEADER: &str = "X-User-Role";

#[cfg(feature = "ssr")]
#[derive(Deserialize, Debug, Default)]
pub struct RankingQuery {
    /// Comma separated cuisines to include
    pub cuisine: Option<String>,
    pub limit: Option<usize>,
}

#[cfg(feature = "ssr")]
#[derive(Deserialize, Debug, Default)]
pub struct UserRankingQuery {
    /// Comma separated cuisines to hide
    pub exclude: Option<String>,
}

/// Reads the caller set by the auth gateway in front of this service.
#[cfg(feature = "ssr")]
pub fn actor_from_request(req: &HttpRequest) -> Result<Actor, AppError> {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
    };

    let user_id = header(USER_ID_HEADER)
        .and_then(|id| Uuid::parse_str(id).ok())
        .ok_or(AppError::Unauthenticated)?;
    let role = match header(USER_ROLE_HEADER) {
        Some(raw) => raw.parse::<Role>().map_err(|_| AppError::Unauthenticated)?,
        None => Role::default(),
    };

    Ok(Actor {
        user_id: user_id.to_string(),
        role,
    })
}

#[cfg(feature = "ssr")]
fn require(actor: &Actor, action: Action, resource: Resource<'_>, what: &'static str) -> Result<(), AppError> {
    if has_capability(actor, action, resource) {
        Ok(())
    } else {
        log!("[API] Denied {:?} on {:?} for user {}", action, resource, actor.user_id);
        Err(AppError::Forbidden(what))
    }
}

#[cfg(feature = "ssr")]
pub async fn load_global_rankings(db: &Database) -> Result<Vec<GlobalRankingEntry>, AppError> {
    let reviews = db.get_all_reviews().await?;
    let restaurants = db.get_restaurants().await?;
    Ok(compute_global_rankings(&reviews, &restaurants))
}

#[cfg(feature = "ssr")]
pub async fn load_user_rankings(db: &Database, user_id: &str) -> Result<Vec<UserRankingEntry>, AppError> {
    // Reject malformed ids before touching the store
    let canonical = parse_user_id(user_id)?.to_string();
    let reviews = db.get_reviews_by_user(&canonical).await?;
    let restaurants = db.get_restaurants().await?;
    Ok(compute_user_rankings(&canonical, &reviews, &restaurants)?)
}

#[cfg(feature = "ssr")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "OK", "timestamp": Utc::now().to_rfc3339() }))
}

#[cfg(feature = "ssr")]
pub async fn get_rankings(
    db: DbData,
    query: web::Query<RankingQuery>,
) -> Result<HttpResponse, AppError> {
    let db = db.lock().await;
    let rankings = load_global_rankings(&db).await?;

    let included = parse_cuisines(query.cuisine.as_deref());
    let mut rankings = filter_included(&rankings, &included);
    if let Some(limit) = query.limit {
        rankings = top(&rankings, limit);
    }

    log!("[API] Returning {} global rankings", rankings.len());
    Ok(HttpResponse::Ok().json(Rankings { rankings }))
}

#[cfg(feature = "ssr")]
pub async fn get_user_rankings_handler(
    db: DbData,
    user_id: web::Path<String>,
    query: web::Query<UserRankingQuery>,
) -> Result<HttpResponse, AppError> {
    let db = db.lock().await;
    let rankings = load_user_rankings(&db, &user_id).await?;

    let excluded = parse_cuisines(query.exclude.as_deref());
    let rankings = filter_excluded(&rankings, &excluded);

    log!("[API] Returning {} rankings for user {}", rankings.len(), user_id);
    Ok(HttpResponse::Ok().json(Rankings { rankings }))
}

#[cfg(feature = "ssr")]
pub async fn list_restaurants(db: DbData) -> Result<HttpResponse, AppError> {
    let db = db.lock().await;
    let restaurants = db.get_restaurants().await?;
    Ok(HttpResponse::Ok().json(json!({ "count": restaurants.len(), "restaurants": restaurants })))
}

#[cfg(feature = "ssr")]
pub async fn get_restaurant(db: DbData, id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let db = db.lock().await;
    let restaurant = db
        .get_restaurant(&id)
        .await?
        .ok_or(AppError::NotFound("Restaurant"))?;
    Ok(HttpResponse::Ok().json(json!({ "restaurant": restaurant })))
}

#[cfg(feature = "ssr")]
pub async fn create_restaurant(
    req: HttpRequest,
    db: DbData,
    body: web::Json<NewRestaurant>,
) -> Result<HttpResponse, AppError> {
    let actor = actor_from_request(&req)?;
    require(&actor, Action::Create, Resource::Restaurant, "create restaurants")?;

    let mut input = body.into_inner();
    input.validate()?;

    let restaurant = Restaurant {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        cuisine: input.cuisine,
        address: input.address,
        description: input.description,
        created_by: actor.user_id,
        created_at: Utc::now(),
    };

    let db = db.lock().await;
    db.insert_restaurant(&restaurant).await?;
    log!("[API] Restaurant {} created", restaurant.id);

    Ok(HttpResponse::Created().json(json!({
        "message": "Restaurant created successfully",
        "restaurant": restaurant
    })))
}

#[cfg(feature = "ssr")]
pub async fn update_restaurant(
    req: HttpRequest,
    db: DbData,
    id: web::Path<String>,
    body: web::Json<RestaurantUpdate>,
) -> Result<HttpResponse, AppError> {
    let actor = actor_from_request(&req)?;
    require(&actor, Action::Update, Resource::Restaurant, "update restaurants")?;

    let update = body.into_inner();
    update.validate()?;

    let db = db.lock().await;
    let mut restaurant = db
        .get_restaurant(&id)
        .await?
        .ok_or(AppError::NotFound("Restaurant"))?;
    update.apply(&mut restaurant);
    db.update_restaurant(&restaurant).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Restaurant updated successfully",
        "restaurant": restaurant
    })))
}

#[cfg(feature = "ssr")]
pub async fn delete_restaurant(
    req: HttpRequest,
    db: DbData,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let actor = actor_from_request(&req)?;
    require(&actor, Action::Delete, Resource::Restaurant, "delete restaurants")?;

    let db = db.lock().await;
    if !db.delete_restaurant(&id).await? {
        return Err(AppError::NotFound("Restaurant"));
    }
    Ok(HttpResponse::Ok().json(json!({ "message": "Restaurant deleted successfully" })))
}

#[cfg(feature = "ssr")]
pub async fn list_reviews(
    db: DbData,
    restaurant_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let db = db.lock().await;
    db.get_restaurant(&restaurant_id)
        .await?
        .ok_or(AppError::NotFound("Restaurant"))?;

    let reviews = db.get_reviews_by_restaurant(&restaurant_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "count": reviews.len(), "reviews": reviews })))
}

#[cfg(feature = "ssr")]
pub async fn get_review(db: DbData, id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let db = db.lock().await;
    let review = db.get_review(&id).await?.ok_or(AppError::NotFound("Review"))?;
    Ok(HttpResponse::Ok().json(json!({ "review": review })))
}

#[cfg(feature = "ssr")]
pub async fn create_review(
    req: HttpRequest,
    db: DbData,
    restaurant_id: web::Path<String>,
    body: web::Json<ReviewInput>,
) -> Result<HttpResponse, AppError> {
    let actor = actor_from_request(&req)?;
    require(
        &actor,
        Action::Create,
        Resource::Review { owner_id: &actor.user_id },
        "review restaurants",
    )?;

    let mut input = body.into_inner();
    input.validate()?;

    let db = db.lock().await;
    db.get_restaurant(&restaurant_id)
        .await?
        .ok_or(AppError::NotFound("Restaurant"))?;

    let review = Review {
        id: Uuid::new_v4().to_string(),
        restaurant_id: restaurant_id.into_inner(),
        user_id: actor.user_id,
        service_rating: input.service_rating,
        price_rating: input.price_rating,
        menu_rating: input.menu_rating,
        comment: input.comment,
        created_at: Utc::now(),
    };
    // A second review by the same user surfaces as AppError::DuplicateReview
    db.insert_review(&review).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Review created successfully",
        "review": review
    })))
}

#[cfg(feature = "ssr")]
pub async fn update_review(
    req: HttpRequest,
    db: DbData,
    id: web::Path<String>,
    body: web::Json<ReviewInput>,
) -> Result<HttpResponse, AppError> {
    let actor = actor_from_request(&req)?;

    let db = db.lock().await;
    let mut review = db.get_review(&id).await?.ok_or(AppError::NotFound("Review"))?;
    require(
        &actor,
        Action::Update,
        Resource::Review { owner_id: &review.user_id },
        "update this review",
    )?;

    let mut input = body.into_inner();
    input.validate()?;

    db.update_review(&review.id, &input).await?;
    review.service_rating = input.service_rating;
    review.price_rating = input.price_rating;
    review.menu_rating = input.menu_rating;
    review.comment = input.comment;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Review updated successfully",
        "review": review
    })))
}

#[cfg(feature = "ssr")]
pub async fn delete_review(
    req: HttpRequest,
    db: DbData,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let actor = actor_from_request(&req)?;

    let db = db.lock().await;
    let review = db.get_review(&id).await?.ok_or(AppError::NotFound("Review"))?;
    require(
        &actor,
        Action::Delete,
        Resource::Review { owner_id: &review.user_id },
        "delete this review",
    )?;

    db.delete_review(&review.id).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Review deleted successfully" })))
}

/// Mounts the REST routes under `/api`.
#[cfg(feature = "ssr")]
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health))
            .route("/rankings", web::get().to(get_rankings))
            .route("/rankings/users/{user_id}", web::get().to(get_user_rankings_handler))
            .route("/restaurants", web::get().to(list_restaurants))
            .route("/restaurants", web::post().to(create_restaurant))
            .route("/restaurants/{id}", web::get().to(get_restaurant))
            .route("/restaurants/{id}", web::put().to(update_restaurant))
            .route("/restaurants/{id}", web::delete().to(delete_restaurant))
            .route("/reviews/restaurant/{restaurant_id}", web::get().to(list_reviews))
            .route("/reviews/restaurant/{restaurant_id}", web::post().to(create_review))
            .route("/reviews/{id}", web::get().to(get_review))
            .route("/reviews/{id}", web::put().to(update_review))
            .route("/reviews/{id}", web::delete().to(delete_review)),
    );
}

#[server(GetGlobalRankings, "/rpc")]
pub async fn get_global_rankings() -> Result<Vec<GlobalRankingEntry>, ServerFnError> {
    let db: DbData = leptos_actix::extract().await?;
    let db = db.lock().await;
    load_global_rankings(&db)
        .await
        .map_err(|e| ServerFnError::ServerError(e.to_string()))
}

#[server(GetUserRankings, "/rpc")]
pub async fn get_user_rankings(user_id: String) -> Result<Vec<UserRankingEntry>, ServerFnError> {
    let db: DbData = leptos_actix::extract().await?;
    let db = db.lock().await;
    load_user_rankings(&db, &user_id)
        .await
        .map_err(|e| ServerFnError::ServerError(e.to_string()))
}
