//! 支付模块
//!
//! - 按需加载第三方结账脚本，构造 `window.Razorpay` 并打开结账窗口
//! - 结账回调后先校验签名，再把支付号登记到订单
//! - 模拟支付方式直接登记 `sim_<毫秒>` 支付号

use crate::api::FitLifeApi;
use crate::serde_helper;
use crate::web::http::HttpTransport;
use fitlife_shared::order::{PaymentOrder, PaymentVerification, simulated_payment_id};
use fitlife_shared::protocol::{ProcessPayment, VerifyPayment};
use fitlife_shared::{ApiResult, User};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

const WIDGET_GLOBAL: &str = "Razorpay";
const BRAND_COLOR: &str = "#10b981";

// =========================================================
// 结账参数 (Checkout Options)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prefill {
    pub name: String,
    pub email: String,
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetTheme {
    pub color: String,
}

/// 传给结账脚本的参数（`handler` 在 JS 侧另行挂载）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutOptions {
    pub key: String,
    /// 最小货币单位
    pub amount: u64,
    pub currency: String,
    pub name: String,
    pub description: String,
    pub order_id: String,
    pub prefill: Prefill,
    pub theme: WidgetTheme,
}

impl CheckoutOptions {
    pub fn new(key: &str, payment: &PaymentOrder, order_number: &str, user: Option<&User>) -> Self {
        let prefill = match user {
            Some(user) => Prefill {
                name: user.display_name(),
                email: user.email.clone(),
                contact: user.phone.clone().unwrap_or_default(),
            },
            None => Prefill {
                name: String::new(),
                email: String::new(),
                contact: String::new(),
            },
        };

        Self {
            key: key.to_string(),
            amount: payment.amount,
            currency: payment.currency.clone(),
            name: "FitLife360".to_string(),
            description: format!("Order #{order_number}"),
            order_id: payment.order_id.clone(),
            prefill,
            theme: WidgetTheme {
                color: BRAND_COLOR.to_string(),
            },
        }
    }
}

/// 结账成功回调参数
#[derive(Debug, Clone, Deserialize)]
struct WidgetResponse {
    razorpay_payment_id: String,
    #[serde(default)]
    razorpay_order_id: String,
    #[serde(default)]
    razorpay_signature: String,
}

impl From<WidgetResponse> for PaymentVerification {
    fn from(r: WidgetResponse) -> Self {
        Self {
            payment_id: r.razorpay_payment_id,
            order_id: r.razorpay_order_id,
            signature: r.razorpay_signature,
        }
    }
}

// =========================================================
// 错误 (Errors)
// =========================================================

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Failed to load payment script")]
    ScriptLoad,
    #[error("Payment widget unavailable")]
    WidgetMissing,
    #[error("Payment widget error: {0}")]
    Js(#[from] serde_helper::Error),
}

impl From<JsValue> for PaymentError {
    fn from(v: JsValue) -> Self {
        PaymentError::Js(serde_helper::Error::JsSys(v))
    }
}

// =========================================================
// 脚本加载与结账 (Widget Binding)
// =========================================================

fn widget_constructor() -> Option<js_sys::Function> {
    let window = web_sys::window()?;
    js_sys::Reflect::get(&window, &JsValue::from_str(WIDGET_GLOBAL))
        .ok()
        .and_then(|v| v.dyn_into::<js_sys::Function>().ok())
}

/// 加载结账脚本；已加载时立即返回
pub async fn load_script(src: &str) -> Result<(), PaymentError> {
    if widget_constructor().is_some() {
        return Ok(());
    }

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(PaymentError::ScriptLoad)?;
    let body = document.body().ok_or(PaymentError::ScriptLoad)?;
    let script: web_sys::HtmlScriptElement = document
        .create_element("script")?
        .dyn_into()
        .map_err(|_| PaymentError::ScriptLoad)?;
    script.set_src(src);
    script.set_async(true);

    let (tx, rx) = futures::channel::oneshot::channel::<bool>();
    let tx = std::rc::Rc::new(std::cell::RefCell::new(Some(tx)));

    let on_load = {
        let tx = tx.clone();
        Closure::once_into_js(move || {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(true);
            }
        })
    };
    let on_error = Closure::once_into_js(move || {
        if let Some(tx) = tx.borrow_mut().take() {
            let _ = tx.send(false);
        }
    });
    script.set_onload(Some(on_load.unchecked_ref()));
    script.set_onerror(Some(on_error.unchecked_ref()));
    body.append_child(&script)?;

    match rx.await {
        Ok(true) => Ok(()),
        _ => {
            log_error!("[Payment] Script failed to load: {}", src);
            Err(PaymentError::ScriptLoad)
        }
    }
}

/// 打开结账窗口，支付完成后以校验参数调用 `on_success`
pub fn open_checkout(
    options: &CheckoutOptions,
    on_success: impl FnOnce(PaymentVerification) + 'static,
) -> Result<(), PaymentError> {
    let constructor = widget_constructor().ok_or(PaymentError::WidgetMissing)?;
    let js_options = serde_helper::to_value(options)?;

    let handler = Closure::once_into_js(move |response: JsValue| {
        match serde_helper::from_value::<WidgetResponse>(response) {
            Ok(response) => on_success(response.into()),
            Err(e) => log_error!("[Payment] Unexpected widget response: {}", e),
        }
    });
    js_sys::Reflect::set(&js_options, &JsValue::from_str("handler"), &handler)?;

    let widget = js_sys::Reflect::construct(&constructor, &js_sys::Array::of1(&js_options))?;
    let open: js_sys::Function = js_sys::Reflect::get(&widget, &JsValue::from_str("open"))?
        .dyn_into()
        .map_err(|_| PaymentError::WidgetMissing)?;
    open.call0(&widget)?;

    log_info!("[Payment] Checkout opened for {}", options.order_id);
    Ok(())
}

// =========================================================
// 支付登记 (Settlement)
// =========================================================

/// 校验签名后登记支付
pub async fn settle_widget_payment<T: HttpTransport>(
    api: &FitLifeApi<T>,
    order_id: i64,
    verification: PaymentVerification,
) -> ApiResult<()> {
    let payment_id = verification.payment_id.clone();
    api.send(&VerifyPayment(verification)).await?;
    api.send(&ProcessPayment {
        order_id,
        payment_id,
    })
    .await?;
    log_info!("[Payment] Order {} paid via widget", order_id);
    Ok(())
}

/// 模拟支付方式直接登记
pub async fn settle_simulated_payment<T: HttpTransport>(
    api: &FitLifeApi<T>,
    order_id: i64,
    now_millis: i64,
) -> ApiResult<()> {
    api.send(&ProcessPayment {
        order_id,
        payment_id: simulated_payment_id(now_millis),
    })
    .await?;
    log_info!("[Payment] Order {} paid (simulated)", order_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::http::HttpMethod;
    use crate::web::http::mock::MockTransport;

    const BASE: &str = "http://api.test";

    fn payment_order() -> PaymentOrder {
        PaymentOrder {
            success: true,
            order_id: "order_Nx1".into(),
            amount: 350_000,
            currency: "INR".into(),
            receipt: None,
        }
    }

    #[test]
    fn options_carry_order_and_guest_prefill() {
        let options = CheckoutOptions::new("rzp_test", &payment_order(), "ORD-42", None);
        assert_eq!(options.description, "Order #ORD-42");
        assert_eq!(options.amount, 350_000);
        assert_eq!(options.order_id, "order_Nx1");
        assert_eq!(options.prefill.email, "");

        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["key"], "rzp_test");
        assert_eq!(json["theme"]["color"], BRAND_COLOR);
    }

    #[tokio::test]
    async fn widget_payment_verifies_before_recording() {
        let api = FitLifeApi::new(BASE, MockTransport::new());
        api.transport_for_test().mock_response(
            HttpMethod::Post,
            &format!("{BASE}/api/payments/verify"),
            200,
            r#"{"success":true}"#,
        );
        api.transport_for_test().mock_response(
            HttpMethod::Post,
            &format!("{BASE}/api/orders/7/payment"),
            200,
            r#"{"message":"Payment processed"}"#,
        );

        settle_widget_payment(
            &api,
            7,
            PaymentVerification {
                payment_id: "pay_1".into(),
                order_id: "order_Nx1".into(),
                signature: "sig".into(),
            },
        )
        .await
        .unwrap();

        let sent = api.transport_for_test().sent();
        assert_eq!(sent.len(), 2);
        assert!(sent[0].url.ends_with("/api/payments/verify"));
        assert!(sent[1].body.as_deref().unwrap().contains("pay_1"));
    }

    #[tokio::test]
    async fn failed_verification_skips_recording() {
        let api = FitLifeApi::new(BASE, MockTransport::new());
        api.transport_for_test().mock_response(
            HttpMethod::Post,
            &format!("{BASE}/api/payments/verify"),
            400,
            r#"{"detail":"Invalid signature"}"#,
        );

        let err = settle_widget_payment(
            &api,
            7,
            PaymentVerification {
                payment_id: "pay_1".into(),
                order_id: "order_Nx1".into(),
                signature: "bad".into(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.user_message(), "Invalid signature");
        assert_eq!(api.transport_for_test().sent().len(), 1);
    }

    #[tokio::test]
    async fn simulated_payment_uses_sim_prefix() {
        let api = FitLifeApi::new(BASE, MockTransport::new());
        api.transport_for_test().mock_response(
            HttpMethod::Post,
            &format!("{BASE}/api/orders/3/payment"),
            200,
            "{}",
        );

        settle_simulated_payment(&api, 3, 1_700_000_000_000).await.unwrap();
        let sent = api.transport_for_test().sent();
        assert!(sent[0].body.as_deref().unwrap().contains("sim_1700000000000"));
    }
}
