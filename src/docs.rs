use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse, RegisterRequestDto};
use crate::modules::books::model::{
    Book, BookProvenance, CreateBookDto, PaginatedBooksResponse, UpdateBookDto,
};
use crate::modules::booksellers::model::{
    ApprovalAction, ApprovalRequest, PaginatedBooksellersResponse,
};
use crate::modules::favorites::model::{AddFavoriteDto, Favorite, FavoriteWithBook};
use crate::modules::orders::model::{CreateOrderDto, Order};
use crate::modules::stats::model::{AdminStats, SellerStats};
use crate::modules::users::model::{
    ChangePasswordDto, PaginatedUsersResponse, Role, SetActiveDto, StoreProfile, StoreStatus,
    UpdateProfileDto, User,
};
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::admin_login,
        crate::modules::users::controller::get_profile,
        crate::modules::users::controller::update_profile,
        crate::modules::users::controller::change_password,
        crate::modules::users::controller::deactivate_profile,
        crate::modules::users::controller::list_users,
        crate::modules::users::controller::set_user_status,
        crate::modules::booksellers::controller::list_booksellers,
        crate::modules::booksellers::controller::transition_approval,
        crate::modules::booksellers::controller::get_own_store,
        crate::modules::books::controller::list_books,
        crate::modules::books::controller::get_book,
        crate::modules::books::controller::create_book,
        crate::modules::books::controller::update_book,
        crate::modules::books::controller::delete_book,
        crate::modules::favorites::controller::list_favorites,
        crate::modules::favorites::controller::add_favorite,
        crate::modules::favorites::controller::remove_favorite,
        crate::modules::orders::controller::create_order,
        crate::modules::orders::controller::list_orders,
        crate::modules::orders::controller::get_order,
        crate::modules::stats::controller::seller_stats,
        crate::modules::stats::controller::admin_stats,
    ),
    components(
        schemas(
            User,
            Role,
            StoreStatus,
            StoreProfile,
            UpdateProfileDto,
            ChangePasswordDto,
            SetActiveDto,
            PaginatedUsersResponse,
            LoginRequest,
            LoginResponse,
            RegisterRequestDto,
            ErrorResponse,
            ApprovalAction,
            ApprovalRequest,
            PaginatedBooksellersResponse,
            Book,
            BookProvenance,
            CreateBookDto,
            UpdateBookDto,
            PaginatedBooksResponse,
            Favorite,
            FavoriteWithBook,
            AddFavoriteDto,
            Order,
            CreateOrderDto,
            SellerStats,
            AdminStats,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Users", description = "Profile and account management"),
        (name = "Booksellers", description = "Store approval workflow"),
        (name = "Books", description = "Catalog management"),
        (name = "Favorites", description = "Per-user favorites"),
        (name = "Orders", description = "Order placement and history"),
        (name = "Stats", description = "Seller and admin dashboards")
    ),
    info(
        title = "Bookmarket API",
        version = "0.1.0",
        description = "A bookstore marketplace REST API with role-based authorization, \
            bookseller store approval and JWT sessions.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
