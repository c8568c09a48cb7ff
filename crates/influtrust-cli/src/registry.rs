//! Read-only registry query handlers.

use influtrust_core::{AppConfig, Claim, RegistryInfluencer};
use influtrust_platforms::{ClientSettings, RegistryClient};

/// Build a registry client from `INFLUTRUST_REGISTRY_URL` and
/// `INFLUTRUST_REGISTRY_API_KEY`.
///
/// # Errors
///
/// Returns an error if either variable is unset or the URL is invalid.
pub(crate) fn registry_client(config: &AppConfig) -> anyhow::Result<RegistryClient> {
    let url = config
        .registry_url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("INFLUTRUST_REGISTRY_URL is not set"))?;
    let api_key = config
        .registry_api_key
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("INFLUTRUST_REGISTRY_API_KEY is not set"))?;
    Ok(RegistryClient::new(
        url,
        api_key,
        &ClientSettings::from(config),
    )?)
}

/// List every influencer in the registry.
///
/// # Errors
///
/// Returns an error if the registry is not configured or the request fails.
pub(crate) async fn run_influencers_list(config: &AppConfig) -> anyhow::Result<()> {
    let influencers = registry_client(config)?.list_influencers().await?;
    if influencers.is_empty() {
        println!("no influencers registered");
        return Ok(());
    }

    println!("{:<26}{:<28}{:<7}CATEGORIES", "ID", "NAME", "TRUST");
    for influencer in &influencers {
        println!("{}", format_influencer_row(influencer));
    }
    Ok(())
}

/// List claims, optionally limited to one influencer.
///
/// # Errors
///
/// Returns an error if the registry is not configured or the request fails.
pub(crate) async fn run_claims_list(
    config: &AppConfig,
    influencer: Option<&str>,
) -> anyhow::Result<()> {
    let claims = registry_client(config)?.list_claims(influencer).await?;
    if claims.is_empty() {
        println!(
            "no claims found{}",
            influencer
                .map(|id| format!(" for influencer '{id}'"))
                .unwrap_or_default()
        );
        return Ok(());
    }

    println!("{:<26}{:<14}CLAIM", "ID", "STATUS");
    for claim in &claims {
        println!("{}", format_claim_row(claim));
    }
    Ok(())
}

pub(crate) fn format_influencer_row(influencer: &RegistryInfluencer) -> String {
    let trust = influencer
        .trust_score
        .map_or_else(|| "-".to_string(), |score| score.to_string());
    format!(
        "{:<26}{:<28}{:<7}{}",
        influencer.id,
        influencer.name,
        trust,
        influencer.categories.join(", ")
    )
}

pub(crate) fn format_claim_row(claim: &Claim) -> String {
    format!(
        "{:<26}{:<14}{}",
        claim.id,
        claim.status.to_string(),
        claim.text
    )
}
