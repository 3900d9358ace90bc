//! FitLife360 API 客户端
//!
//! 所有页面通过 `FitLifeApi::send` 访问后端：
//! - 自动附加 `Authorization: Bearer <token>`
//! - 非 2xx 响应统一转为 `ApiError`，消息取自错误体
//! - 带令牌的请求收到 401 时触发注销回调
//! - 可缓存的 GET 走 `ResponseCache`，写操作成功后按前缀失效

use crate::web::http::{HttpMethod, HttpRequest, HttpTransport};
use crate::web::FetchTransport;
use fitlife_shared::cache::ResponseCache;
use fitlife_shared::cache::encode_query;
use fitlife_shared::protocol::ApiRequest;
use fitlife_shared::{ApiError, ApiResult, HEADER_AUTHORIZATION};
use leptos::prelude::*;
use std::sync::{Arc, Mutex, RwLock};

const FALLBACK_MESSAGE: &str = "Request failed. Please try again.";

type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

pub struct FitLifeApi<T: HttpTransport = FetchTransport> {
    base_url: String,
    transport: Arc<T>,
    token: Arc<RwLock<Option<String>>>,
    cache: Arc<Mutex<ResponseCache>>,
    on_unauthorized: Arc<RwLock<Option<UnauthorizedHook>>>,
}

impl<T: HttpTransport> Clone for FitLifeApi<T> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            transport: Arc::clone(&self.transport),
            token: Arc::clone(&self.token),
            cache: Arc::clone(&self.cache),
            on_unauthorized: Arc::clone(&self.on_unauthorized),
        }
    }
}

impl FitLifeApi<FetchTransport> {
    /// 浏览器中使用的客户端
    pub fn browser(base_url: &str) -> Self {
        Self::new(base_url, FetchTransport)
    }
}

impl<T: HttpTransport> FitLifeApi<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport: Arc::new(transport),
            token: Arc::new(RwLock::new(None)),
            cache: Arc::new(Mutex::new(ResponseCache::new())),
            on_unauthorized: Arc::new(RwLock::new(None)),
        }
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> String {
        if query.is_empty() {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}{}?{}", self.base_url, path, encode_query(query))
        }
    }

    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = token;
        }
        // 缓存内容与身份相关
        self.clear_cache();
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    /// 401 回调（认证上下文注册，用于清除会话）
    pub fn on_unauthorized(&self, hook: impl Fn() + Send + Sync + 'static) {
        if let Ok(mut slot) = self.on_unauthorized.write() {
            *slot = Some(Arc::new(hook));
        }
    }

    pub fn clear_cache(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
    }

    #[cfg(test)]
    pub(crate) fn transport_for_test(&self) -> &T {
        &self.transport
    }

    fn cached(&self, key: &str) -> Option<String> {
        self.cache
            .lock()
            .ok()
            .and_then(|cache| cache.get(key).map(str::to_string))
    }

    fn after_success<R: ApiRequest>(&self, key: String, body: &str) {
        let Ok(mut cache) = self.cache.lock() else {
            return;
        };
        if R::METHOD == HttpMethod::Get {
            if R::CACHEABLE {
                cache.put(key, body.to_string());
            }
        } else {
            for prefix in R::INVALIDATES {
                cache.invalidate_prefix(prefix);
            }
        }
    }

    fn notify_unauthorized(&self) {
        let hook = self.on_unauthorized.read().ok().and_then(|h| h.clone());
        if let Some(hook) = hook {
            hook();
        }
    }

    /// 发送一个端点请求并解析响应
    pub async fn send<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let path = req.path();
        let query = req.query();
        let cache_key = ResponseCache::key(&path, &query);

        if R::METHOD == HttpMethod::Get && R::CACHEABLE {
            if let Some(body) = self.cached(&cache_key) {
                return Ok(serde_json::from_str(&body)?);
            }
        }

        let token = self.token();
        let mut http = HttpRequest::new(&self.url(&path, &query), R::METHOD)
            .with_header("Accept", "application/json");
        if let Some(token) = token.as_deref() {
            http = http.with_header(HEADER_AUTHORIZATION, &format!("Bearer {token}"));
        }
        if let Some(body) = req.body() {
            http = http
                .with_header("Content-Type", "application/json")
                .with_body(body);
        }

        let response = self.transport.send(http).await.inspect_err(|e| {
            log_error!("[Api] {} {} {}: {}", R::METHOD.as_str(), path, e.error_code(), e);
        })?;

        if !response.ok() {
            let err = ApiError::from_response(response.status, &response.body, FALLBACK_MESSAGE);
            log_error!("[Api] {} {} {}: {}", R::METHOD.as_str(), path, err.error_code(), err);
            if err.is_unauthorized() && token.is_some() {
                self.set_token(None);
                self.notify_unauthorized();
            }
            return Err(err);
        }

        // 空响应体按 null 解析（DELETE 等）
        let body = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };
        let value = serde_json::from_str::<R::Response>(body).inspect_err(|e| {
            log_error!("[Api] {} {} decode failed: {}", R::METHOD.as_str(), path, e);
        })?;

        self.after_success::<R>(cache_key, body);
        Ok(value)
    }
}

// =========================================================
// Context
// =========================================================

pub fn provide_api(api: FitLifeApi) {
    provide_context(api);
}

pub fn use_api() -> FitLifeApi {
    use_context::<FitLifeApi>().expect("FitLifeApi should be provided")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::http::mock::MockTransport;
    use fitlife_shared::protocol::{
        CurrentUser, DeleteNotification, ListCategories, ListProducts, Login, PlaceOrder,
        SetUserStatus,
    };
    use fitlife_shared::listing::ProductFilter;
    use fitlife_shared::order::{OrderCreate, OrderLine};
    use std::sync::atomic::{AtomicUsize, Ordering};

    const BASE: &str = "http://api.test";

    fn api() -> FitLifeApi<MockTransport> {
        FitLifeApi::new("http://api.test/", MockTransport::new())
    }

    const ORDER_JSON: &str = r#"{
        "id": 3, "user_id": 1, "order_number": "ORD-3", "total_amount": 35.0,
        "status": "pending", "payment_status": "pending", "order_items": []
    }"#;

    #[tokio::test]
    async fn login_posts_json_without_bearer() {
        let api = api();
        api.transport.mock_response(
            HttpMethod::Post,
            &format!("{BASE}/api/auth/login"),
            200,
            r#"{"access_token":"tok","token_type":"bearer"}"#,
        );

        let token = api
            .send(&Login {
                username: "jdoe".into(),
                password: "pw".into(),
            })
            .await
            .unwrap();
        assert_eq!(token.access_token, "tok");

        let sent = api.transport.sent();
        assert!(!sent[0].headers.contains_key(HEADER_AUTHORIZATION));
        assert_eq!(sent[0].headers.get("Content-Type").unwrap(), "application/json");
        assert!(sent[0].body.as_deref().unwrap().contains("\"username\":\"jdoe\""));
    }

    #[tokio::test]
    async fn attaches_bearer_and_query() {
        let api = api();
        api.set_token(Some("tok".into()));
        api.transport.mock_response(
            HttpMethod::Put,
            &format!("{BASE}/api/admin/users/5/status?is_active=false"),
            200,
            r#"{"message":"User status updated"}"#,
        );

        let ack = api
            .send(&SetUserStatus {
                id: 5,
                is_active: false,
            })
            .await
            .unwrap();
        assert_eq!(ack.message.as_deref(), Some("User status updated"));
        assert_eq!(
            api.transport.sent()[0].headers.get(HEADER_AUTHORIZATION).unwrap(),
            "Bearer tok"
        );
    }

    #[tokio::test]
    async fn error_body_becomes_message() {
        let api = api();
        api.transport.mock_response(
            HttpMethod::Post,
            &format!("{BASE}/api/auth/login"),
            400,
            r#"{"detail":"Incorrect username or password"}"#,
        );

        let err = api
            .send(&Login {
                username: "x".into(),
                password: "y".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.user_message(), "Incorrect username or password");
    }

    #[tokio::test]
    async fn unauthorized_with_token_fires_hook_and_drops_token() {
        let api = api();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        api.on_unauthorized(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        api.set_token(Some("expired".into()));
        api.transport.mock_response(
            HttpMethod::Get,
            &format!("{BASE}/api/auth/me"),
            401,
            r#"{"detail":"Could not validate credentials"}"#,
        );

        let err = api.send(&CurrentUser).await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(api.token().is_none());

        // 无令牌的 401 不再触发
        let _ = api.send(&CurrentUser).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cacheable_get_is_served_from_cache() {
        let api = api();
        api.transport.mock_response(
            HttpMethod::Get,
            &format!("{BASE}/api/products/categories"),
            200,
            r#"["supplements","snacks"]"#,
        );

        let first = api.send(&ListCategories).await.unwrap();
        let second = api.send(&ListCategories).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(api.transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn mutation_invalidates_cached_prefix() {
        let api = api();
        api.set_token(Some("tok".into()));
        api.transport.mock_response(
            HttpMethod::Get,
            &format!("{BASE}/api/products/?search=whey"),
            200,
            "[]",
        );
        api.transport.mock_response(HttpMethod::Post, &format!("{BASE}/api/orders/"), 200, ORDER_JSON);

        let list = ListProducts {
            filter: ProductFilter {
                search: "whey".into(),
                ..Default::default()
            },
        };
        api.send(&list).await.unwrap();
        api.send(&PlaceOrder(OrderCreate {
            items: vec![OrderLine {
                product_id: 1,
                quantity: 2,
            }],
            shipping_address: "1 Main St".into(),
            billing_address: "1 Main St".into(),
            payment_method: "card".into(),
            notes: None,
        }))
        .await
        .unwrap();
        api.send(&list).await.unwrap();

        let gets = api
            .transport
            .sent()
            .iter()
            .filter(|r| r.method == HttpMethod::Get)
            .count();
        assert_eq!(gets, 2);
    }

    #[tokio::test]
    async fn empty_body_decodes_as_ack() {
        let api = api();
        api.transport.mock_response(
            HttpMethod::Delete,
            &format!("{BASE}/api/notifications/9"),
            204,
            "",
        );
        let ack = api.send(&DeleteNotification { id: 9 }).await.unwrap();
        assert!(ack.message.is_none());
    }

    #[tokio::test]
    async fn transport_failure_is_network_error() {
        let api = api();
        let err = api.send(&CurrentUser).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
