use chrono::Utc;

use crate::auth::CurrentUser;
use crate::models::Profile;
use crate::store::Store;
use crate::utils::AppResult;

/// The caller's profile, created from the token on first sight.
pub async fn get_or_create_profile(store: &dyn Store, user: &CurrentUser) -> AppResult<Profile> {
    if let Some(profile) = store.get_profile(user.id).await? {
        return Ok(profile);
    }

    let profile = store
        .insert_profile(Profile::from_identity(user.id, user.email.clone(), Utc::now()))
        .await?;
    tracing::info!(user_id = %user.id, "Created profile");
    Ok(profile)
}
