//! # Warden - Authentication & Session Lifecycle Library
//!
//! This is a facade crate that re-exports all public APIs from the warden
//! components. Use this crate to get access to the whole authentication
//! core in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! warden = { path = "../warden" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `User`, `Session`,
//!   `VerificationCode`, etc.
//! - **Repository traits**: `UserStore`, `SessionStore`,
//!   `VerificationCodeStore`
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase`, `RefreshUseCase`, etc.
//! - **Adapters**: `PostgresUserStore`, `Argon2PasswordHasher`,
//!   `PostmarkEmailClient`, etc.
//! - **Service**: `AuthService` - The main entry point for the auth service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use warden_core::*;
}

// Re-export most commonly used core types at the root level
pub use warden_core::{
    Email, Password, RateLimitPolicy, Session, SessionId, User, UserError, UserId, UserView,
    VerificationCode, VerificationCodeId, VerificationCodeKind,
};

// ============================================================================
// Repository Traits (Ports)
// ============================================================================

/// Repository trait definitions
pub mod repositories {
    pub use warden_core::{
        SessionStore, SessionStoreError, UserStore, UserStoreError, VerificationCodeStore,
        VerificationCodeStoreError,
    };
}

// Re-export repository and service traits at root level
pub use warden_core::{
    EmailClient, PasswordHasher, SessionStore, SessionStoreError, UserStore, UserStoreError,
    VerificationCodeStore, VerificationCodeStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use warden_application::*;
}

// Re-export use cases and the token service at root level
pub use warden_application::{
    AuthPolicy, LoginUseCase, LogoutUseCase, RefreshUseCase, RegisterUseCase,
    RequestPasswordResetUseCase, ResetPasswordUseCase, TokenConfig, TokenError, TokenService,
    VerifyEmailUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Persistence implementations
    pub mod persistence {
        pub use warden_adapters::persistence::*;
    }

    /// Password hashing
    pub mod hashing {
        pub use warden_adapters::hashing::*;
    }

    /// Email client implementations
    pub mod email {
        pub use warden_adapters::email::*;
    }

    /// Configuration
    pub mod config {
        pub use warden_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use warden_adapters::{
    Argon2PasswordHasher, HashMapSessionStore, HashMapUserStore, HashMapVerificationCodeStore,
    MockEmailClient, PostgresSessionStore, PostgresUserStore, PostgresVerificationCodeStore,
    PostmarkEmailClient,
};

// ============================================================================
// HTTP Boundary
// ============================================================================

/// Axum routes, cookies and error mapping
pub mod http {
    pub use warden_axum::*;
}

pub use warden_axum::{AuthApiError, AuthSession, AuthState};

// ============================================================================
// Auth Service (Main Entry Point)
// ============================================================================

/// Main auth service
pub use warden_auth_service::{
    AuthService, auth_policy_from_settings, configure_postgresql, get_postgres_pool,
    token_service_from_settings,
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing repository traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
