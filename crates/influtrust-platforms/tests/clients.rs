//! Integration tests for the platform clients using wiremock HTTP mocks.

use influtrust_core::{Platform, SampleSet};
use influtrust_platforms::{
    ClientSettings, InstagramClient, LinkedInClient, PlatformError, YouTubeClient,
};
use serde_json::json;
use wiremock::matchers::{bearer_token, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings() -> ClientSettings {
    ClientSettings {
        timeout_secs: 5,
        media_limit: 5,
        ..ClientSettings::default()
    }
}

async fn mount_instagram_account(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/17841"))
        .and(query_param("access_token", "ig-token"))
        .and(query_param(
            "fields",
            "id,username,name,followers_count,media_count",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "17841",
            "username": "dra.ana",
            "name": "Dra. Ana",
            "followers_count": 12000,
            "media_count": 100
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn instagram_profile_includes_media() {
    let server = MockServer::start().await;
    mount_instagram_account(&server).await;

    let media: Vec<_> = (0..5)
        .map(|i| {
            json!({
                "id": format!("m{i}"),
                "caption": "#saude #fitness",
                "like_count": 100,
                "comments_count": 10,
                "timestamp": "2024-05-01T10:30:00+0000"
            })
        })
        .collect();
    Mock::given(method("GET"))
        .and(path("/17841/media"))
        .and(query_param("limit", "5"))
        .and(query_param("access_token", "ig-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": media })))
        .mount(&server)
        .await;

    let client = InstagramClient::with_base_url("ig-token", &server.uri(), &settings())
        .expect("client construction should not fail");
    let profile = client.fetch_profile("17841").await.expect("profile");

    assert_eq!(profile.platform, Platform::Instagram);
    assert_eq!(profile.name, "Dra. Ana");
    assert_eq!(profile.followers, 12_000);
    assert_eq!(profile.statistics.posts, 100);
    let samples = profile.samples.samples();
    assert_eq!(samples.len(), 5);
    assert_eq!(samples[0].interactions(), 110);
}

#[tokio::test]
async fn instagram_media_failure_keeps_profile() {
    let server = MockServer::start().await;
    mount_instagram_account(&server).await;
    Mock::given(method("GET"))
        .and(path("/17841/media"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": {"message": "An unexpected error has occurred", "code": 2}
        })))
        .mount(&server)
        .await;

    let client = InstagramClient::with_base_url("ig-token", &server.uri(), &settings())
        .expect("client construction should not fail");
    let profile = client.fetch_profile("17841").await.expect("profile");
    assert_eq!(profile.samples, SampleSet::Unavailable);
}

#[tokio::test]
async fn instagram_api_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/17841"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"message": "Invalid OAuth access token.", "type": "OAuthException", "code": 190}
        })))
        .mount(&server)
        .await;

    let client = InstagramClient::with_base_url("bad", &server.uri(), &settings())
        .expect("client construction should not fail");
    let err = client.fetch_profile("17841").await.unwrap_err();
    match err {
        PlatformError::Api {
            service,
            status,
            message,
        } => {
            assert_eq!(service, "instagram");
            assert_eq!(status, 400);
            assert!(message.contains("Invalid OAuth"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn rate_limit_reads_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/17841"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "17"))
        .mount(&server)
        .await;

    let client = InstagramClient::with_base_url("ig-token", &server.uri(), &settings())
        .expect("client construction should not fail");
    let err = client.fetch_account("17841").await.unwrap_err();
    assert!(
        matches!(
            err,
            PlatformError::RateLimited {
                retry_after_secs: 17,
                ..
            }
        ),
        "got {err:?}"
    );
}

async fn mount_youtube_channel(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/channels"))
        .and(query_param("part", "snippet,statistics"))
        .and(query_param("id", "UCsaude"))
        .and(query_param("key", "yt-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": "UCsaude",
                "snippet": {"title": "Canal Saúde", "description": "Dicas"},
                "statistics": {"viewCount": "900000", "subscriberCount": "45000", "videoCount": "120"}
            }]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn youtube_profile_combines_search_and_videos() {
    let server = MockServer::start().await;
    mount_youtube_channel(&server).await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("channelId", "UCsaude"))
        .and(query_param("order", "date"))
        .and(query_param("type", "video"))
        .and(query_param("maxResults", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"id": {"kind": "youtube#video", "videoId": "v1"}},
                {"id": {"kind": "youtube#video", "videoId": "v2"}}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", "v1,v2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "id": "v1",
                    "snippet": {"title": "Treino HIIT", "description": "", "categoryId": "17", "tags": ["fitness"]},
                    "statistics": {"viewCount": "4000", "likeCount": "180", "commentCount": "20"}
                },
                {
                    "id": "v2",
                    "snippet": {"title": "Dieta", "description": "Nutrição", "categoryId": "26"},
                    "statistics": {"viewCount": "6000", "likeCount": "280", "commentCount": "20"}
                }
            ]
        })))
        .mount(&server)
        .await;

    let client = YouTubeClient::with_base_url("yt-key", &server.uri(), &settings())
        .expect("client construction should not fail");
    let profile = client.fetch_profile("UCsaude").await.expect("profile");

    assert_eq!(profile.platform, Platform::YouTube);
    assert_eq!(profile.name, "Canal Saúde");
    assert_eq!(profile.followers, 45_000);
    assert_eq!(profile.statistics.views, 900_000);
    assert_eq!(profile.statistics.posts, 120);
    assert_eq!(profile.samples.samples().len(), 2);
    assert_eq!(profile.category_ids, vec!["17", "26"]);
    assert_eq!(profile.tags, vec!["fitness"]);
}

#[tokio::test]
async fn youtube_without_uploads_has_empty_samples() {
    let server = MockServer::start().await;
    mount_youtube_channel(&server).await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let client = YouTubeClient::with_base_url("yt-key", &server.uri(), &settings())
        .expect("client construction should not fail");
    let profile = client.fetch_profile("UCsaude").await.expect("profile");
    assert_eq!(profile.samples, SampleSet::Fetched(Vec::new()));
}

#[tokio::test]
async fn youtube_unknown_channel_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "pageInfo": {"totalResults": 0} })))
        .mount(&server)
        .await;

    let client = YouTubeClient::with_base_url("yt-key", &server.uri(), &settings())
        .expect("client construction should not fail");
    let err = client.fetch_channel("UCmissing").await.unwrap_err();
    assert!(matches!(err, PlatformError::NotFound { .. }), "got {err:?}");
}

#[tokio::test]
async fn linkedin_profile_uses_bearer_token_and_urns() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/organizations/4242"))
        .and(bearer_token("li-token"))
        .and(header("X-Restli-Protocol-Version", "2.0.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 4242,
            "localizedName": "Hospital Central",
            "industries": ["Hospital & Health Care"]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/networkSizes/urn:li:organization:4242"))
        .and(query_param("edgeType", "CompanyFollowedByMember"))
        .and(bearer_token("li-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "firstDegreeSize": 2000 })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/posts"))
        .and(query_param("q", "author"))
        .and(query_param("author", "urn:li:organization:4242"))
        .and(query_param("count", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "elements": [
                {"commentary": "Campanha de vacinas", "statistics": {"likeCount": 30, "commentCount": 10, "shareCount": 2}},
                {"commentary": "Saúde mental no trabalho", "statistics": {"likeCount": 35, "commentCount": 5}}
            ]
        })))
        .mount(&server)
        .await;

    let client = LinkedInClient::with_base_url("li-token", &server.uri(), &settings())
        .expect("client construction should not fail");
    let profile = client.fetch_profile("4242").await.expect("profile");

    assert_eq!(profile.platform, Platform::LinkedIn);
    assert_eq!(profile.name, "Hospital Central");
    assert_eq!(profile.followers, 2_000);
    assert_eq!(profile.industry.as_deref(), Some("Hospital & Health Care"));
    assert_eq!(profile.samples.samples().len(), 2);
}

#[tokio::test]
async fn linkedin_posts_failure_yields_unavailable_samples() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/organizations/4242"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "localizedName": "Hospital Central" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/networkSizes/urn:li:organization:4242"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "firstDegreeSize": "3100" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/posts"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "Not enough permissions to access: posts",
            "status": 403
        })))
        .mount(&server)
        .await;

    let client = LinkedInClient::with_base_url("li-token", &server.uri(), &settings())
        .expect("client construction should not fail");
    let profile = client.fetch_profile("4242").await.expect("profile");
    assert_eq!(profile.followers, 3_100);
    assert_eq!(profile.samples, SampleSet::Unavailable);
    assert!(profile.industry.is_none());
}
