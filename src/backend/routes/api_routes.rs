/**
 * API Route Handlers
 *
 * This module defines the `/api/v1` routes, one configure function per
 * resource. Each resource splits into public routes and protected routes;
 * the protected ones sit behind [`auth_middleware`] via `route_layer`, so
 * unmatched paths still fall through to the JSON 404.
 *
 * # Public Routes
 *
 * - `GET  /healthcheck`
 * - `POST /users/register`
 * - `POST /users/login`
 * - `POST /users/refresh-token`
 * - `GET  /videos/public`
 *
 * Everything else requires an access token.
 */

use axum::middleware::from_fn_with_state;
use axum::routing::{get, patch, post};
use axum::Router;

use crate::backend::auth::handlers::{
    change_password, current_user, get_channel_profile, get_watch_history, login, logout,
    refresh_access_token, register, update_account_details, update_user_avatar,
    update_user_cover_image,
};
use crate::backend::healthcheck::healthcheck;
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;
use crate::backend::{comments, dashboard, likes, playlists, subscriptions, tweets, videos};

/// Wrap already-registered routes in the access-token check
fn protect(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    router.route_layer(from_fn_with_state(state.clone(), auth_middleware))
}

/// `/users`
fn user_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh-token", post(refresh_access_token));

    let protected = Router::new()
        .route("/logout", post(logout))
        .route("/change-password", post(change_password))
        .route("/current-user", get(current_user))
        .route("/update-profile", patch(update_account_details))
        .route("/update-avatar", patch(update_user_avatar))
        .route("/update-cover", patch(update_user_cover_image))
        .route("/c/{username}", get(get_channel_profile))
        .route("/history", get(get_watch_history));

    public.merge(protect(protected, state))
}

/// `/videos`
fn video_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new().route("/public", get(videos::get_public_videos));

    let protected = Router::new()
        .route("/", get(videos::get_all_videos).post(videos::publish_a_video))
        .route("/panel/{video_id}", get(videos::get_next_videos))
        .route(
            "/{video_id}",
            get(videos::get_video_by_id)
                .patch(videos::update_video)
                .delete(videos::delete_video),
        )
        .route("/toggle/publish/{video_id}", patch(videos::toggle_publish_status))
        .route("/views/{video_id}", patch(videos::update_video_views));

    public.merge(protect(protected, state))
}

/// `/comments`
fn comment_routes(state: &AppState) -> Router<AppState> {
    let routes = Router::new()
        .route(
            "/{video_id}",
            get(comments::get_video_comments).post(comments::add_comment),
        )
        .route(
            "/c/{comment_id}",
            patch(comments::update_comment).delete(comments::delete_comment),
        );

    protect(routes, state)
}

/// `/likes`
fn like_routes(state: &AppState) -> Router<AppState> {
    let routes = Router::new()
        .route("/toggle/v/{video_id}", post(likes::toggle_video_like))
        .route("/toggle/c/{comment_id}", post(likes::toggle_comment_like))
        .route("/toggle/t/{tweet_id}", post(likes::toggle_tweet_like))
        .route("/videos", get(likes::get_liked_videos));

    protect(routes, state)
}

/// `/subscriptions`
fn subscription_routes(state: &AppState) -> Router<AppState> {
    let routes = Router::new()
        .route(
            "/c/{channel_id}",
            get(subscriptions::get_user_channel_subscribers).post(subscriptions::toggle_subscription),
        )
        .route("/u/{subscriber_id}", get(subscriptions::get_subscribed_channels));

    protect(routes, state)
}

/// `/tweets`
fn tweet_routes(state: &AppState) -> Router<AppState> {
    let routes = Router::new()
        .route("/", post(tweets::create_tweet))
        .route("/user/{user_id}", get(tweets::get_user_tweets))
        .route(
            "/{tweet_id}",
            patch(tweets::update_tweet).delete(tweets::delete_tweet),
        );

    protect(routes, state)
}

/// `/playlists`
fn playlist_routes(state: &AppState) -> Router<AppState> {
    let routes = Router::new()
        .route("/", post(playlists::create_playlist))
        .route("/user/{user_id}", get(playlists::get_user_playlists))
        .route(
            "/{playlist_id}",
            get(playlists::get_playlist_by_id)
                .patch(playlists::update_playlist)
                .delete(playlists::delete_playlist),
        )
        .route(
            "/add/{video_id}/{playlist_id}",
            patch(playlists::add_video_to_playlist),
        )
        .route(
            "/remove/{video_id}/{playlist_id}",
            patch(playlists::remove_video_from_playlist),
        );

    protect(routes, state)
}

/// `/dashboard`
fn dashboard_routes(state: &AppState) -> Router<AppState> {
    let routes = Router::new()
        .route("/stats", get(dashboard::get_channel_stats))
        .route("/videos", get(dashboard::get_channel_videos));

    protect(routes, state)
}

/// Configure API routes
///
/// Returns the router to be nested under `/api/v1`.
pub fn configure_api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/healthcheck", get(healthcheck))
        .nest("/users", user_routes(state))
        .nest("/videos", video_routes(state))
        .nest("/comments", comment_routes(state))
        .nest("/likes", like_routes(state))
        .nest("/subscriptions", subscription_routes(state))
        .nest("/tweets", tweet_routes(state))
        .nest("/playlists", playlist_routes(state))
        .nest("/dashboard", dashboard_routes(state))
}
