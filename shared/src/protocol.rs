//! 后端 REST 端点目录
//!
//! 每个端点一个请求类型，通过 `ApiRequest` 描述方法、路径、查询参数、请求体
//! 与响应类型。标量参数（状态切换、计算器输入、通知字段）按后端约定放在查询串中。

use crate::admin::{AdminDashboardStats, Analytics, ConsultantDashboard};
use crate::catalog::{Product, ProductInput, ProductReview, ReviewInput};
use crate::consultation::{
    AvailabilitySlot, Consultant, ConsultantInput, Consultation, ConsultationCreate,
    ConsultationStatus, ConsultationUpdate, SlotInput,
};
use crate::health::{BmiResult, BodyFatResult, CalorieResult, ProgressInput, ProgressRecord};
use crate::listing::ProductFilter;
use crate::notification::{Notification, NotificationDraft};
use crate::order::{
    Order, OrderCreate, OrderStatus, PaymentConfig, PaymentOrder, PaymentVerification,
};
use crate::user::{AdminUserUpdate, Role, Token, User, UserCreate, UserUpdate};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// GET responses that may be served from the client cache.
    const CACHEABLE: bool = false;
    /// Path prefixes whose cached responses a successful call makes stale.
    const INVALIDATES: &'static [&'static str] = &[];

    fn path(&self) -> String;

    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn body(&self) -> Option<Value> {
        None
    }
}

fn json_body<T: Serialize>(value: &T) -> Option<Value> {
    serde_json::to_value(value).ok()
}

/// 仅含提示消息的响应（`{"message": "..."}`、空体或 `null`）
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Option<Value>")]
pub struct Ack {
    pub message: Option<String>,
}

impl From<Option<Value>> for Ack {
    fn from(value: Option<Value>) -> Self {
        Ack {
            message: value
                .as_ref()
                .and_then(|v| v.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }
}

const PRODUCTS: &str = "/api/products";
const CONSULTANTS: &str = "/api/consultants";
const CONSULTATIONS: &str = "/api/consultations";
const ORDERS: &str = "/api/orders";
const NOTIFICATIONS: &str = "/api/notifications";
const ADMIN: &str = "/api/admin";
const USERS: &str = "/api/users";

// =========================================================
// 认证 (Auth)
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct Login {
    pub username: String,
    pub password: String,
}

impl ApiRequest for Login {
    type Response = Token;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/auth/login".into()
    }

    fn body(&self) -> Option<Value> {
        json_body(self)
    }
}

#[derive(Debug, Clone)]
pub struct Register(pub UserCreate);

impl ApiRequest for Register {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/auth/register".into()
    }

    fn body(&self) -> Option<Value> {
        json_body(&self.0)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CurrentUser;

impl ApiRequest for CurrentUser {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/auth/me".into()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RefreshToken;

impl ApiRequest for RefreshToken {
    type Response = Token;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/auth/refresh".into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ForgotPassword {
    pub email: String,
}

impl ApiRequest for ForgotPassword {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/auth/forgot-password".into()
    }

    fn body(&self) -> Option<Value> {
        json_body(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResetPassword {
    pub token: String,
    pub new_password: String,
}

impl ApiRequest for ResetPassword {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/auth/reset-password".into()
    }

    fn body(&self) -> Option<Value> {
        json_body(self)
    }
}

// =========================================================
// 用户档案 / 进度 / 计算器
// =========================================================

#[derive(Debug, Clone, Copy)]
pub struct GetProfile;

impl ApiRequest for GetProfile {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{USERS}/profile")
    }
}

#[derive(Debug, Clone)]
pub struct UpdateProfile(pub UserUpdate);

impl ApiRequest for UpdateProfile {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Put;
    const INVALIDATES: &'static [&'static str] = &[USERS, "/api/auth/me"];

    fn path(&self) -> String {
        format!("{USERS}/profile")
    }

    fn body(&self) -> Option<Value> {
        json_body(&self.0)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ListProgress;

impl ApiRequest for ListProgress {
    type Response = Vec<ProgressRecord>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{USERS}/progress")
    }
}

#[derive(Debug, Clone)]
pub struct CreateProgress(pub ProgressInput);

impl ApiRequest for CreateProgress {
    type Response = ProgressRecord;
    const METHOD: HttpMethod = HttpMethod::Post;
    const INVALIDATES: &'static [&'static str] = &[USERS];

    fn path(&self) -> String {
        format!("{USERS}/progress")
    }

    fn body(&self) -> Option<Value> {
        json_body(&self.0)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BmiCalculation {
    pub height: f64,
    pub weight: f64,
}

impl ApiRequest for BmiCalculation {
    type Response = BmiResult;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{USERS}/calculators/bmi")
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("height", self.height.to_string()),
            ("weight", self.weight.to_string()),
        ]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CalorieCalculation;

impl ApiRequest for CalorieCalculation {
    type Response = CalorieResult;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{USERS}/calculators/calories")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BodyFatCalculation {
    pub waist: f64,
    pub neck: f64,
    pub hip: Option<f64>,
}

impl ApiRequest for BodyFatCalculation {
    type Response = BodyFatResult;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{USERS}/calculators/body-fat")
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("waist", self.waist.to_string()),
            ("neck", self.neck.to_string()),
        ];
        if let Some(hip) = self.hip {
            pairs.push(("hip", hip.to_string()));
        }
        pairs
    }
}

// =========================================================
// 商品 (Products)
// =========================================================

#[derive(Debug, Clone, Default)]
pub struct ListProducts {
    pub filter: ProductFilter,
}

impl ApiRequest for ListProducts {
    type Response = Vec<Product>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const CACHEABLE: bool = true;

    fn path(&self) -> String {
        format!("{PRODUCTS}/")
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        self.filter.query()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetProduct {
    pub id: i64,
}

impl ApiRequest for GetProduct {
    type Response = Product;
    const METHOD: HttpMethod = HttpMethod::Get;
    const CACHEABLE: bool = true;

    fn path(&self) -> String {
        format!("{PRODUCTS}/{}", self.id)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ListCategories;

impl ApiRequest for ListCategories {
    type Response = Vec<String>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const CACHEABLE: bool = true;

    fn path(&self) -> String {
        format!("{PRODUCTS}/categories")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FeaturedProducts;

impl ApiRequest for FeaturedProducts {
    type Response = Vec<Product>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const CACHEABLE: bool = true;

    fn path(&self) -> String {
        format!("{PRODUCTS}/featured/")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ListReviews {
    pub product_id: i64,
}

impl ApiRequest for ListReviews {
    type Response = Vec<ProductReview>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{PRODUCTS}/{}/reviews", self.product_id)
    }
}

#[derive(Debug, Clone)]
pub struct CreateReview(pub ReviewInput);

impl ApiRequest for CreateReview {
    type Response = ProductReview;
    const METHOD: HttpMethod = HttpMethod::Post;
    const INVALIDATES: &'static [&'static str] = &[PRODUCTS];

    fn path(&self) -> String {
        format!("{PRODUCTS}/{}/reviews", self.0.product_id)
    }

    fn body(&self) -> Option<Value> {
        json_body(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct CreateProduct(pub ProductInput);

impl ApiRequest for CreateProduct {
    type Response = Product;
    const METHOD: HttpMethod = HttpMethod::Post;
    const INVALIDATES: &'static [&'static str] = &[PRODUCTS, "/api/admin/products"];

    fn path(&self) -> String {
        format!("{PRODUCTS}/")
    }

    fn body(&self) -> Option<Value> {
        json_body(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateProduct {
    pub id: i64,
    pub input: ProductInput,
}

impl ApiRequest for UpdateProduct {
    type Response = Product;
    const METHOD: HttpMethod = HttpMethod::Put;
    const INVALIDATES: &'static [&'static str] = &[PRODUCTS, "/api/admin/products"];

    fn path(&self) -> String {
        format!("{PRODUCTS}/{}", self.id)
    }

    fn body(&self) -> Option<Value> {
        json_body(&self.input)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteProduct {
    pub id: i64,
}

impl ApiRequest for DeleteProduct {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;
    const INVALIDATES: &'static [&'static str] = &[PRODUCTS, "/api/admin/products"];

    fn path(&self) -> String {
        format!("{PRODUCTS}/{}", self.id)
    }
}

// =========================================================
// 顾问 (Consultants)
// =========================================================

#[derive(Debug, Clone, Default)]
pub struct ListConsultants {
    pub specialization: Option<String>,
}

impl ApiRequest for ListConsultants {
    type Response = Vec<Consultant>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const CACHEABLE: bool = true;

    fn path(&self) -> String {
        format!("{CONSULTANTS}/")
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        match self.specialization.as_deref() {
            Some(s) if !s.is_empty() => vec![("specialization", s.to_string())],
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetConsultant {
    pub id: i64,
}

impl ApiRequest for GetConsultant {
    type Response = Consultant;
    const METHOD: HttpMethod = HttpMethod::Get;
    const CACHEABLE: bool = true;

    fn path(&self) -> String {
        format!("{CONSULTANTS}/{}", self.id)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ListAvailability {
    pub consultant_id: i64,
}

impl ApiRequest for ListAvailability {
    type Response = Vec<AvailabilitySlot>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{CONSULTANTS}/{}/availability", self.consultant_id)
    }
}

#[derive(Debug, Clone)]
pub struct CreateAvailability {
    pub consultant_id: i64,
    pub slot: SlotInput,
}

impl ApiRequest for CreateAvailability {
    type Response = AvailabilitySlot;
    const METHOD: HttpMethod = HttpMethod::Post;
    const INVALIDATES: &'static [&'static str] = &[CONSULTANTS];

    fn path(&self) -> String {
        format!("{CONSULTANTS}/{}/availability", self.consultant_id)
    }

    fn body(&self) -> Option<Value> {
        json_body(&self.slot)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteAvailability {
    pub slot_id: i64,
}

impl ApiRequest for DeleteAvailability {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;
    const INVALIDATES: &'static [&'static str] = &[CONSULTANTS];

    fn path(&self) -> String {
        format!("{CONSULTANTS}/availability/{}", self.slot_id)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetConsultantDashboard;

impl ApiRequest for GetConsultantDashboard {
    type Response = ConsultantDashboard;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{CONSULTANTS}/dashboard")
    }
}

// =========================================================
// 咨询 (Consultations)
// =========================================================

#[derive(Debug, Clone, Copy)]
pub struct ListConsultations;

impl ApiRequest for ListConsultations {
    type Response = Vec<Consultation>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{CONSULTATIONS}/")
    }
}

#[derive(Debug, Clone)]
pub struct BookConsultation(pub ConsultationCreate);

impl ApiRequest for BookConsultation {
    type Response = Consultation;
    const METHOD: HttpMethod = HttpMethod::Post;
    const INVALIDATES: &'static [&'static str] = &[CONSULTATIONS, CONSULTANTS];

    fn path(&self) -> String {
        format!("{CONSULTATIONS}/")
    }

    fn body(&self) -> Option<Value> {
        json_body(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateConsultation {
    pub id: i64,
    pub update: ConsultationUpdate,
}

impl ApiRequest for UpdateConsultation {
    type Response = Consultation;
    const METHOD: HttpMethod = HttpMethod::Put;
    const INVALIDATES: &'static [&'static str] = &[CONSULTATIONS, CONSULTANTS];

    fn path(&self) -> String {
        format!("{CONSULTATIONS}/{}", self.id)
    }

    fn body(&self) -> Option<Value> {
        json_body(&self.update)
    }
}

/// 用户取消预约
#[derive(Debug, Clone, Copy)]
pub struct CancelConsultation {
    pub id: i64,
}

impl ApiRequest for CancelConsultation {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;
    const INVALIDATES: &'static [&'static str] = &[CONSULTATIONS, CONSULTANTS];

    fn path(&self) -> String {
        format!("{CONSULTATIONS}/{}", self.id)
    }
}

#[derive(Debug, Clone)]
pub struct RateConsultation {
    pub id: i64,
    pub rating: u8,
    pub feedback: Option<String>,
}

impl ApiRequest for RateConsultation {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;
    const INVALIDATES: &'static [&'static str] = &[CONSULTATIONS, CONSULTANTS];

    fn path(&self) -> String {
        format!("{CONSULTATIONS}/{}/rate", self.id)
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("rating", self.rating.to_string())];
        if let Some(feedback) = self.feedback.as_ref().filter(|f| !f.is_empty()) {
            pairs.push(("feedback", feedback.clone()));
        }
        pairs
    }
}

// =========================================================
// 订单 / 支付 (Orders & Payments)
// =========================================================

#[derive(Debug, Clone, Copy)]
pub struct ListOrders;

impl ApiRequest for ListOrders {
    type Response = Vec<Order>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{ORDERS}/")
    }
}

#[derive(Debug, Clone)]
pub struct PlaceOrder(pub OrderCreate);

impl ApiRequest for PlaceOrder {
    type Response = Order;
    const METHOD: HttpMethod = HttpMethod::Post;
    // 库存随下单变化
    const INVALIDATES: &'static [&'static str] = &[ORDERS, PRODUCTS];

    fn path(&self) -> String {
        format!("{ORDERS}/")
    }

    fn body(&self) -> Option<Value> {
        json_body(&self.0)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CreatePayment {
    pub order_id: i64,
}

impl ApiRequest for CreatePayment {
    type Response = PaymentOrder;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("{ORDERS}/{}/create-payment", self.order_id)
    }
}

#[derive(Debug, Clone)]
pub struct ProcessPayment {
    pub order_id: i64,
    pub payment_id: String,
}

impl ApiRequest for ProcessPayment {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;
    const INVALIDATES: &'static [&'static str] = &[ORDERS];

    fn path(&self) -> String {
        format!("{ORDERS}/{}/payment", self.order_id)
    }

    fn body(&self) -> Option<Value> {
        Some(serde_json::json!({ "payment_id": self.payment_id }))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct UpdateOrderStatus {
    pub id: i64,
    pub status: OrderStatus,
}

impl ApiRequest for UpdateOrderStatus {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Put;
    const INVALIDATES: &'static [&'static str] = &[ORDERS, "/api/admin/orders"];

    fn path(&self) -> String {
        format!("{ORDERS}/{}/status", self.id)
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("status", self.status.as_str().to_string())]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CancelOrder {
    pub id: i64,
}

impl ApiRequest for CancelOrder {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;
    const INVALIDATES: &'static [&'static str] = &[ORDERS, PRODUCTS];

    fn path(&self) -> String {
        format!("{ORDERS}/{}/cancel", self.id)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetPaymentConfig;

impl ApiRequest for GetPaymentConfig {
    type Response = PaymentConfig;
    const METHOD: HttpMethod = HttpMethod::Get;
    const CACHEABLE: bool = true;

    fn path(&self) -> String {
        "/api/payments/config".into()
    }
}

#[derive(Debug, Clone)]
pub struct VerifyPayment(pub PaymentVerification);

impl ApiRequest for VerifyPayment {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/payments/verify".into()
    }

    fn body(&self) -> Option<Value> {
        json_body(&self.0)
    }
}

// =========================================================
// 管理员 (Admin)
// =========================================================

#[derive(Debug, Clone, Copy)]
pub struct GetAdminDashboard;

impl ApiRequest for GetAdminDashboard {
    type Response = AdminDashboardStats;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{ADMIN}/dashboard")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetAnalytics;

impl ApiRequest for GetAnalytics {
    type Response = Analytics;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{ADMIN}/analytics")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AdminListUsers;

impl ApiRequest for AdminListUsers {
    type Response = Vec<User>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{ADMIN}/users")
    }
}

#[derive(Debug, Clone)]
pub struct AdminCreateUser(pub UserCreate);

impl ApiRequest for AdminCreateUser {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Post;
    const INVALIDATES: &'static [&'static str] = &["/api/admin/users"];

    fn path(&self) -> String {
        format!("{ADMIN}/users")
    }

    fn body(&self) -> Option<Value> {
        json_body(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct AdminUpdateUser {
    pub id: i64,
    pub update: AdminUserUpdate,
}

impl ApiRequest for AdminUpdateUser {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Put;
    const INVALIDATES: &'static [&'static str] = &["/api/admin/users"];

    fn path(&self) -> String {
        format!("{ADMIN}/users/{}", self.id)
    }

    fn body(&self) -> Option<Value> {
        json_body(&self.update)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SetUserStatus {
    pub id: i64,
    pub is_active: bool,
}

impl ApiRequest for SetUserStatus {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Put;
    const INVALIDATES: &'static [&'static str] = &["/api/admin/users"];

    fn path(&self) -> String {
        format!("{ADMIN}/users/{}/status", self.id)
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("is_active", self.is_active.to_string())]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SetUserRole {
    pub id: i64,
    pub role: Role,
}

impl ApiRequest for SetUserRole {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Put;
    const INVALIDATES: &'static [&'static str] = &["/api/admin/users", "/api/admin/consultants"];

    fn path(&self) -> String {
        format!("{ADMIN}/users/{}/role", self.id)
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("role", self.role.as_str().to_string())]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AdminDeleteUser {
    pub id: i64,
}

impl ApiRequest for AdminDeleteUser {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;
    const INVALIDATES: &'static [&'static str] = &["/api/admin/users"];

    fn path(&self) -> String {
        format!("{ADMIN}/users/{}", self.id)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AdminListConsultants;

impl ApiRequest for AdminListConsultants {
    type Response = Vec<Consultant>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{ADMIN}/consultants")
    }
}

#[derive(Debug, Clone)]
pub struct AdminCreateConsultant(pub ConsultantInput);

impl ApiRequest for AdminCreateConsultant {
    type Response = Consultant;
    const METHOD: HttpMethod = HttpMethod::Post;
    const INVALIDATES: &'static [&'static str] = &["/api/admin/consultants", CONSULTANTS];

    fn path(&self) -> String {
        format!("{ADMIN}/consultants")
    }

    fn body(&self) -> Option<Value> {
        json_body(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct AdminUpdateConsultant {
    pub id: i64,
    pub input: ConsultantInput,
}

impl ApiRequest for AdminUpdateConsultant {
    type Response = Consultant;
    const METHOD: HttpMethod = HttpMethod::Put;
    const INVALIDATES: &'static [&'static str] = &["/api/admin/consultants", CONSULTANTS];

    fn path(&self) -> String {
        format!("{ADMIN}/consultants/{}", self.id)
    }

    fn body(&self) -> Option<Value> {
        json_body(&self.input)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SetConsultantAvailability {
    pub id: i64,
    pub is_available: bool,
}

impl ApiRequest for SetConsultantAvailability {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Put;
    const INVALIDATES: &'static [&'static str] = &["/api/admin/consultants", CONSULTANTS];

    fn path(&self) -> String {
        format!("{ADMIN}/consultants/{}/status", self.id)
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("is_available", self.is_available.to_string())]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AdminDeleteConsultant {
    pub id: i64,
}

impl ApiRequest for AdminDeleteConsultant {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;
    const INVALIDATES: &'static [&'static str] = &["/api/admin/consultants", CONSULTANTS];

    fn path(&self) -> String {
        format!("{ADMIN}/consultants/{}", self.id)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AdminListProducts;

impl ApiRequest for AdminListProducts {
    type Response = Vec<Product>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{ADMIN}/products")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AdminListOrders;

impl ApiRequest for AdminListOrders {
    type Response = Vec<Order>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{ADMIN}/orders")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AdminListConsultations;

impl ApiRequest for AdminListConsultations {
    type Response = Vec<Consultation>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{ADMIN}/consultations")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SetConsultationStatus {
    pub id: i64,
    pub status: ConsultationStatus,
}

impl ApiRequest for SetConsultationStatus {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Put;
    const INVALIDATES: &'static [&'static str] = &["/api/admin/consultations", CONSULTATIONS];

    fn path(&self) -> String {
        format!("{ADMIN}/consultations/{}/status", self.id)
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("status", self.status.as_str().to_string())]
    }
}

#[derive(Debug, Clone)]
pub struct AdminUpdateConsultation {
    pub id: i64,
    pub update: ConsultationUpdate,
}

impl ApiRequest for AdminUpdateConsultation {
    type Response = Consultation;
    const METHOD: HttpMethod = HttpMethod::Put;
    const INVALIDATES: &'static [&'static str] = &["/api/admin/consultations", CONSULTATIONS];

    fn path(&self) -> String {
        format!("{ADMIN}/consultations/{}", self.id)
    }

    fn body(&self) -> Option<Value> {
        json_body(&self.update)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AdminDeleteConsultation {
    pub id: i64,
}

impl ApiRequest for AdminDeleteConsultation {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;
    const INVALIDATES: &'static [&'static str] = &["/api/admin/consultations", CONSULTATIONS];

    fn path(&self) -> String {
        format!("{ADMIN}/consultations/{}", self.id)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AdminListReviews;

impl ApiRequest for AdminListReviews {
    type Response = Vec<ProductReview>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{ADMIN}/reviews")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AdminDeleteReview {
    pub id: i64,
}

impl ApiRequest for AdminDeleteReview {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;
    const INVALIDATES: &'static [&'static str] = &["/api/admin/reviews", PRODUCTS];

    fn path(&self) -> String {
        format!("{ADMIN}/reviews/{}", self.id)
    }
}

// =========================================================
// 通知 (Notifications)
// =========================================================

#[derive(Debug, Clone, Copy)]
pub struct ListNotifications;

impl ApiRequest for ListNotifications {
    type Response = Vec<Notification>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{NOTIFICATIONS}/")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MarkNotificationRead {
    pub id: i64,
}

impl ApiRequest for MarkNotificationRead {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("{NOTIFICATIONS}/{}/read", self.id)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MarkAllNotificationsRead;

impl ApiRequest for MarkAllNotificationsRead {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("{NOTIFICATIONS}/read-all")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteNotification {
    pub id: i64,
}

impl ApiRequest for DeleteNotification {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("{NOTIFICATIONS}/{}", self.id)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteAllNotifications;

impl ApiRequest for DeleteAllNotifications {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("{NOTIFICATIONS}/")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AdminListNotifications;

impl ApiRequest for AdminListNotifications {
    type Response = Vec<Notification>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{NOTIFICATIONS}/admin/all")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AdminMarkNotificationRead {
    pub id: i64,
}

impl ApiRequest for AdminMarkNotificationRead {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("{NOTIFICATIONS}/admin/{}/read", self.id)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AdminMarkAllNotificationsRead;

impl ApiRequest for AdminMarkAllNotificationsRead {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("{NOTIFICATIONS}/admin/read-all")
    }
}

/// 发送给单个用户；`user_id` 为空时请改用 `BroadcastNotification`
#[derive(Debug, Clone)]
pub struct SendNotification(pub NotificationDraft);

impl ApiRequest for SendNotification {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("{NOTIFICATIONS}/send")
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        self.0.query()
    }
}

#[derive(Debug, Clone)]
pub struct BroadcastNotification(pub NotificationDraft);

impl ApiRequest for BroadcastNotification {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("{NOTIFICATIONS}/broadcast")
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut draft = self.0.clone();
        draft.user_id = None;
        draft.query()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn collection_routes_keep_trailing_slash() {
        assert_eq!(ListProducts::default().path(), "/api/products/");
        assert_eq!(ListConsultations.path(), "/api/consultations/");
        assert_eq!(ListNotifications.path(), "/api/notifications/");
        assert_eq!(GetProduct { id: 4 }.path(), "/api/products/4");
    }

    #[test]
    fn scalar_parameters_travel_in_query() {
        let req = SetUserStatus {
            id: 5,
            is_active: false,
        };
        assert_eq!(req.path(), "/api/admin/users/5/status");
        assert_eq!(req.query(), vec![("is_active", "false".to_string())]);
        assert!(req.body().is_none());

        let req = SetUserRole {
            id: 5,
            role: Role::Consultant,
        };
        assert_eq!(req.query(), vec![("role", "CONSULTANT".to_string())]);

        let req = UpdateOrderStatus {
            id: 1,
            status: OrderStatus::Shipped,
        };
        assert_eq!(req.query(), vec![("status", "shipped".to_string())]);
    }

    #[test]
    fn body_carrying_requests() {
        let login = Login {
            username: "jdoe".into(),
            password: "secret".into(),
        };
        assert_eq!(
            login.body(),
            Some(json!({ "username": "jdoe", "password": "secret" }))
        );

        let pay = ProcessPayment {
            order_id: 9,
            payment_id: "pay_1".into(),
        };
        assert_eq!(pay.path(), "/api/orders/9/payment");
        assert_eq!(pay.body(), Some(json!({ "payment_id": "pay_1" })));
    }

    #[test]
    fn body_fat_hip_is_optional() {
        let req = BodyFatCalculation {
            waist: 80.0,
            neck: 38.5,
            hip: None,
        };
        assert_eq!(
            req.query(),
            vec![("waist", "80".to_string()), ("neck", "38.5".to_string())]
        );
    }

    #[test]
    fn ack_accepts_message_null_and_arbitrary_objects() {
        let ack: Ack = serde_json::from_str(r#"{"message":"done"}"#).unwrap();
        assert_eq!(ack.message.as_deref(), Some("done"));
        let ack: Ack = serde_json::from_str("null").unwrap();
        assert_eq!(ack, Ack::default());
        let ack: Ack = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(ack.message.is_none());
    }

    #[test]
    fn cache_flags() {
        assert!(ListCategories::CACHEABLE);
        assert!(!ListOrders::CACHEABLE);
        assert!(PlaceOrder::INVALIDATES.contains(&"/api/products"));
    }
}
