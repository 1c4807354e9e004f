//! Multi-screen flows shared by several scenarios.

use tracing::info;

use crate::error::Result;
use crate::scenarios::ScenarioContext;

/// Signs in through Google as the configured user `user_key`.
///
/// Starts on the launch screen and ends on the map, after the app has had
/// time to load the account.
pub async fn google_login(cx: &ScenarioContext<'_>, user_key: &str) -> Result<()> {
	let user = cx.user(user_key)?;
	info!(target = "nose.flow", user = user_key, "signing in with Google");
	let login = cx.login_page();

	login.click_continue_with_google().await?;
	login.accept_sign_in_consent(cx.config().alert_timeout()).await?;
	cx.pause(2.0).await;

	login.choose_account(user).await?;
	cx.pause(2.0).await;

	login.click_continue().await?;
	cx.pause(10.0).await;
	Ok(())
}

/// Signs out from the map screen back to the launch screen.
pub async fn logout(cx: &ScenarioContext<'_>) -> Result<()> {
	info!(target = "nose.flow", "signing out");
	let library = cx.library_page();

	library.open().await?;
	cx.pause(2.0).await;
	library.open_account().await?;
	cx.pause(1.0).await;
	library.click_logout().await?;
	cx.pause(1.0).await;
	library.click_confirm().await?;
	cx.pause(1.0).await;
	library.click_ok().await?;
	cx.pause(1.0).await;
	Ok(())
}

/// Grants the map's location prompt when it shows up after sign-in.
pub async fn allow_location_if_asked(cx: &ScenarioContext<'_>) -> Result<()> {
	if !cx.home_page().allow_location_permission().await? {
		info!(target = "nose.flow", "location permission prompt not shown");
	}
	cx.pause(1.0).await;
	Ok(())
}
