use test_utils::builder::TestBuilder;

use crate::server::{
    error::AppError,
    middleware::session::{AuthSession, DashboardSession},
    model::user::AuthUser,
};


fn user() -> AuthUser {
    AuthUser {
        id: 80351110224678912,
        username: "nelly".to_string(),
        discriminator: None,
        global_name: None,
        avatar: None,
        guilds: vec![],
    }
}
