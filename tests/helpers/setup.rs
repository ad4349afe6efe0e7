use dispo_api::Application;
use dispo_infra::{run_migration, setup_context, Config};
use dispo_sdk::{DispoSDK, RegisterUserInput, SignInInput};

pub struct TestApp {
    pub config: Config,
    pub address: String,
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, DispoSDK) {
    run_migration().await.expect("Failed to run migrations");
    let mut ctx = setup_context().await.expect("Failed to setup context");
    ctx.config.port = 0; // Random port
    ctx.config.timezone = "Europe/Paris".parse().expect("Known timezone");

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp { config, address };
    let sdk = DispoSDK::new(app.address.clone(), None);
    (app, sdk)
}

/// Registers a fresh admin and returns an sdk acting on its behalf
pub async fn spawn_admin_sdk(app: &TestApp, sdk: &DispoSDK) -> DispoSDK {
    let email = super::utils::unique_email();
    let password = "password1".to_string();
    sdk.auth
        .register(RegisterUserInput {
            secret_code: app.config.create_user_secret_code.clone(),
            email: email.clone(),
            name: Some("Admin".into()),
            password: password.clone(),
        })
        .await
        .expect("Expected to register admin");
    let res = sdk
        .auth
        .sign_in(SignInInput { email, password })
        .await
        .expect("Expected to sign in");

    DispoSDK::new(app.address.clone(), Some(res.token))
}
