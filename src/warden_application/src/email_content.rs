/// Bodies for the emails the auth flows send. Kept next to the use cases
/// because the links they carry are part of the flow contract, not of the
/// transport adapter.
pub struct EmailMessage {
    pub subject: &'static str,
    pub html: String,
}

pub fn verify_email_message(url: &str) -> EmailMessage {
    EmailMessage {
        subject: "Verify your email address",
        html: format!(
            "<p>Thanks for signing up! Click the link below to verify your email address.</p>\
             <p><a href=\"{url}\">Verify email</a></p>\
             <p>If you did not create an account, you can ignore this email.</p>"
        ),
    }
}

pub fn password_reset_message(url: &str) -> EmailMessage {
    EmailMessage {
        subject: "Reset your password",
        html: format!(
            "<p>You requested a password reset. Click the link below to choose a new password.</p>\
             <p><a href=\"{url}\">Reset password</a></p>\
             <p>The link expires in one hour. If you did not request a reset, you can ignore this email.</p>"
        ),
    }
}
