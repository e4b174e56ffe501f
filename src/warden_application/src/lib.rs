pub mod email_content;
pub mod policy;
pub mod tokens;
pub mod use_cases;

pub use policy::AuthPolicy;
pub use tokens::{
    AccessTokenClaims, RefreshTokenClaims, TokenConfig, TokenError, TokenService,
};
pub use use_cases::{
    AuthenticatedUser,
    login::{LoginError, LoginUseCase},
    logout::{LogoutError, LogoutUseCase},
    refresh::{RefreshError, RefreshUseCase, RefreshedTokens},
    register::{RegisterError, RegisterUseCase},
    request_password_reset::{RequestPasswordResetError, RequestPasswordResetUseCase},
    reset_password::{ResetPasswordError, ResetPasswordUseCase},
    verify_email::{VerifyEmailError, VerifyEmailUseCase},
};
