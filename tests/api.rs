mod helpers;

use helpers::setup::spawn_app;
use reminder_sdk::{
    APIErrorVariant, AddReminderInput, GenerateReminderInput, ReminderSDK, SignupInput, ID,
};
use std::time::Duration;

async fn signup_and_login(sdk: &ReminderSDK, email: &str) -> ID {
    sdk.user
        .signup(SignupInput {
            name: "Ada".into(),
            email: email.into(),
            password: "secret-password".into(),
            role: None,
            notification_address: None,
        })
        .await
        .expect("Expected to sign up");

    sdk.user
        .login(email.into(), "secret-password".into())
        .await
        .expect("Expected to log in")
        .user
        .id
}

fn png_input(user_id: ID) -> GenerateReminderInput {
    GenerateReminderInput {
        file_name: "note.png".into(),
        mime_type: "image/png".into(),
        photo: b"\x89PNG fake image".to_vec(),
        user_id,
    }
}

#[actix_web::main]
#[test]
async fn test_status_ok() {
    let (_, sdk, _) = spawn_app(None).await;
    assert!(sdk.status.check_health().await.is_ok());
}

#[actix_web::main]
#[test]
async fn test_signup_and_login() {
    let (_, sdk, _) = spawn_app(None).await;
    let res = sdk
        .user
        .signup(SignupInput {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "secret-password".into(),
            role: None,
            notification_address: None,
        })
        .await
        .expect("Expected to sign up");
    assert_eq!(res.message, "User created successfully");

    let res = sdk
        .user
        .login("ada@example.com".into(), "secret-password".into())
        .await
        .expect("Expected to log in");
    assert!(!res.token.is_empty());
    assert_eq!(res.user.email, "ada@example.com");
    assert_eq!(res.user.role, "user");

    let err = sdk
        .user
        .signup(SignupInput {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "another-password".into(),
            role: None,
            notification_address: None,
        })
        .await
        .expect_err("Expected duplicate signup to fail");
    assert_eq!(err.variant, APIErrorVariant::BadClientData);
    assert_eq!(err.message, "User already exists");

    let err = sdk
        .user
        .login("ada@example.com".into(), "wrong-password".into())
        .await
        .expect_err("Expected wrong password to fail");
    assert_eq!(err.variant, APIErrorVariant::BadClientData);
    assert_eq!(err.message, "Invalid credentials");

    let err = sdk
        .user
        .login("nobody@example.com".into(), "secret-password".into())
        .await
        .expect_err("Expected unknown email to fail");
    assert_eq!(err.message, "User not found");
}

#[actix_web::main]
#[test]
async fn test_add_get_and_delete_reminders() {
    let (_, sdk, _) = spawn_app(None).await;
    let user_id = signup_and_login(&sdk, "grace@example.com").await;
    let other_user_id = signup_and_login(&sdk, "alan@example.com").await;

    let reminders = sdk
        .reminder
        .add(AddReminderInput {
            reminder_msg: "Book flights".into(),
            remind_at: "2999-01-01T09:00:00".into(),
            user_id: user_id.clone(),
        })
        .await
        .expect("Expected to add reminder");
    assert_eq!(reminders.len(), 1);
    let reminder = reminders[0].clone();
    assert_eq!(reminder.reminder_msg, "Book flights");
    assert_eq!(reminder.remind_at, "2999-01-01T09:00:00");
    assert!(!reminder.is_reminded);

    sdk.reminder
        .add(AddReminderInput {
            reminder_msg: "Renew passport".into(),
            remind_at: "2999-02-01T09:00:00".into(),
            user_id: other_user_id.clone(),
        })
        .await
        .expect("Expected to add reminder");

    let reminders = sdk
        .reminder
        .get_all(user_id.clone())
        .await
        .expect("Expected to get reminders");
    assert_eq!(reminders, vec![reminder.clone()]);

    let err = sdk
        .reminder
        .add(AddReminderInput {
            reminder_msg: "".into(),
            remind_at: "2999-02-01T09:00:00".into(),
            user_id: user_id.clone(),
        })
        .await
        .expect_err("Expected blank message to be rejected");
    assert_eq!(err.variant, APIErrorVariant::BadClientData);

    let remaining = sdk
        .reminder
        .delete(reminder.id.clone())
        .await
        .expect("Expected to delete reminder");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].user_id, other_user_id);

    // Deleting it again is not an error
    let remaining = sdk
        .reminder
        .delete(reminder.id)
        .await
        .expect("Expected unknown reminder to be ignored");
    assert_eq!(remaining.len(), 1);
    assert!(sdk.reminder.get_all(user_id).await.unwrap().is_empty());
}

#[actix_web::main]
#[test]
async fn test_generate_reminder_from_image() {
    let (app, sdk, _) = spawn_app(Some(
        r#"{"reminderMsg": "Dentist appointment", "remindAt": "2999-06-12T07:00:00.000"}"#,
    ))
    .await;
    let user_id = signup_and_login(&sdk, "ada@example.com").await;

    let res = sdk
        .reminder
        .generate(png_input(user_id.clone()))
        .await
        .expect("Expected to generate reminder");
    assert_eq!(res.message, "Reminder generated and saved");
    assert_eq!(res.reminder.reminder_msg, "Dentist appointment");
    assert_eq!(res.reminder.remind_at, "2999-06-12T07:00:00.000");
    assert_eq!(res.reminder.user_id, user_id);
    assert!(!res.reminder.is_reminded);

    let reminders = sdk.reminder.get_all(user_id).await.unwrap();
    assert_eq!(reminders, vec![res.reminder]);

    // The uploaded image is removed once processed
    let mut uploads = tokio::fs::read_dir(&app.config.upload_dir).await.unwrap();
    assert!(uploads.next_entry().await.unwrap().is_none());
}

#[actix_web::main]
#[test]
async fn test_generate_reminder_rejects_non_images() {
    let (_, sdk, _) = spawn_app(None).await;
    let user_id = signup_and_login(&sdk, "ada@example.com").await;

    let err = sdk
        .reminder
        .generate(GenerateReminderInput {
            file_name: "notes.txt".into(),
            mime_type: "text/plain".into(),
            photo: b"not an image".to_vec(),
            user_id,
        })
        .await
        .expect_err("Expected text file to be rejected");
    assert_eq!(err.variant, APIErrorVariant::BadClientData);
    assert_eq!(err.message, "Images only!");
}

#[actix_web::main]
#[test]
async fn test_generate_reminder_when_extraction_fails() {
    let (app, sdk, _) = spawn_app(None).await;
    let user_id = signup_and_login(&sdk, "ada@example.com").await;

    let err = sdk
        .reminder
        .generate(png_input(user_id.clone()))
        .await
        .expect_err("Expected extraction failure");
    assert_eq!(err.variant, APIErrorVariant::InternalError);
    assert_eq!(err.message, "Error processing image");
    assert!(sdk.reminder.get_all(user_id).await.unwrap().is_empty());

    let mut uploads = tokio::fs::read_dir(&app.config.upload_dir).await.unwrap();
    assert!(uploads.next_entry().await.unwrap().is_none());
}

#[actix_web::main]
#[test]
async fn test_due_reminders_are_sent_once() {
    let (app, sdk, _) = spawn_app(None).await;
    let user_id = signup_and_login(&sdk, "ada@example.com").await;

    sdk.reminder
        .add(AddReminderInput {
            reminder_msg: "Take out the trash".into(),
            remind_at: "2020-01-01T09:00:00Z".into(),
            user_id: user_id.clone(),
        })
        .await
        .unwrap();
    sdk.reminder
        .add(AddReminderInput {
            reminder_msg: "Far away".into(),
            remind_at: "2999-01-01T09:00:00Z".into(),
            user_id: user_id.clone(),
        })
        .await
        .unwrap();

    actix_web::rt::time::sleep(Duration::from_millis(500)).await;

    let reminders = sdk.reminder.get_all(user_id).await.unwrap();
    assert!(reminders[0].is_reminded);
    assert!(!reminders[1].is_reminded);

    let sent = app.gateway.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].body, "Take out the trash");
    assert_eq!(sent[0].recipient, "whatsapp:+10000000000");
}
