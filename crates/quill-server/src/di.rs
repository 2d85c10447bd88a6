//! Dependency injection module using Shaku.
//!
//! `AppModule` wires the whole single-process deployment: the PostgreSQL
//! pool and repositories, the security components, the listing cache and
//! the four application services.

use deadpool_redis::{Pool, PoolConfig, Runtime};
use quill_config::{AppConfig, RedisConfig};
use quill_core::{QuillError, QuillResult};
use quill_repository::{
    DatabasePool, DatabasePoolParameters, PgCommentRepository, PgPostRepository, PgUserRepository,
};
use quill_security::{
    PasswordHasher, PasswordHasherParameters, TokenProvider, TokenProviderParameters,
};
use quill_service::{
    AuthServiceComponent, CommentServiceComponent, CommentServiceComponentParameters,
    PostServiceComponent, PostServiceComponentParameters, RedisCacheService,
    RedisCacheServiceParameters, UserServiceComponent, UserServiceComponentParameters,
};
use shaku::module;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;

module! {
    pub AppModule {
        components = [
            DatabasePool,
            PgUserRepository,
            PgPostRepository,
            PgCommentRepository,
            RedisCacheService,
            PasswordHasher,
            TokenProvider,
            AuthServiceComponent,
            UserServiceComponent,
            PostServiceComponent,
            CommentServiceComponent,
        ],
        providers = [],
    }
}

/// Builds the Redis pool, or `None` when the cache is disabled.
///
/// No connection is opened here; the first cache call checks one out.
pub fn create_cache_pool(config: &RedisConfig) -> QuillResult<Option<Arc<Pool>>> {
    if !config.enabled {
        info!("Redis disabled, listings will always be read from the database");
        return Ok(None);
    }

    let mut redis_cfg = deadpool_redis::Config::from_url(&config.url);
    redis_cfg.pool = Some(PoolConfig::new(config.pool_size));
    let pool = redis_cfg
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| QuillError::Cache(format!("Failed to create Redis pool: {e}")))?;

    Ok(Some(Arc::new(pool)))
}

/// Builds the application module from an open database pool and an
/// optional Redis pool.
pub fn build_app_module(
    db_pool: PgPool,
    cache_pool: Option<Arc<Pool>>,
    config: &AppConfig,
) -> Arc<AppModule> {
    let password_hasher = PasswordHasher::with_cost(config.security.password_hash_cost);
    let security_config = Arc::new(config.security.clone());
    let token_provider = TokenProvider::new(security_config.clone());
    let listing_ttl = config.cache.listing_ttl();

    let module = AppModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters { pool: db_pool })
        .with_component_parameters::<RedisCacheService>(RedisCacheServiceParameters {
            pool: cache_pool,
        })
        .with_component_parameters::<PasswordHasher>(PasswordHasherParameters {
            argon2: password_hasher.argon2_arc(),
        })
        .with_component_parameters::<TokenProvider>(TokenProviderParameters {
            encoding_key: token_provider.encoding_key().clone(),
            decoding_key: token_provider.decoding_key().clone(),
            config: security_config,
            validation: token_provider.validation().clone(),
        })
        .with_component_parameters::<UserServiceComponent>(UserServiceComponentParameters {
            listing_ttl,
        })
        .with_component_parameters::<PostServiceComponent>(PostServiceComponentParameters {
            listing_ttl,
        })
        .with_component_parameters::<CommentServiceComponent>(
            CommentServiceComponentParameters { listing_ttl },
        )
        .build();

    Arc::new(module)
}
