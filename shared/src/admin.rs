//! 管理端与顾问端的聚合统计

use crate::date::Timestamp;
use serde::{Deserialize, Serialize};

// =========================================================
// 管理员仪表盘
// =========================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CountPair {
    #[serde(default)]
    pub total: u64,
    #[serde(default, alias = "pending", alias = "scheduled")]
    pub active: u64,
}

/// `GET /api/admin/dashboard`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminDashboardStats {
    #[serde(default)]
    pub users: CountPair,
    #[serde(default)]
    pub consultants: CountPair,
    #[serde(default)]
    pub products: CountPair,
    /// `active` 对应待处理订单数
    #[serde(default)]
    pub orders: CountPair,
    /// `active` 对应已排期咨询数
    #[serde(default)]
    pub consultations: CountPair,
}

// =========================================================
// 分析
// =========================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueStats {
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub monthly: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub completed: u64,
    #[serde(default)]
    pub pending: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UserGrowth {
    #[serde(default)]
    pub new_this_month: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsultationStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub completed: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopProduct {
    pub name: String,
    #[serde(default)]
    pub total_sold: u64,
    #[serde(default)]
    pub total_revenue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopConsultant {
    pub id: i64,
    #[serde(default)]
    pub specialization: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub total_consultations: u64,
}

/// `GET /api/admin/analytics`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    #[serde(default)]
    pub revenue: RevenueStats,
    #[serde(default)]
    pub orders: OrderStats,
    #[serde(default)]
    pub users: UserGrowth,
    #[serde(default)]
    pub consultations: ConsultationStats,
    #[serde(default)]
    pub top_products: Vec<TopProduct>,
    #[serde(default)]
    pub top_consultants: Vec<TopConsultant>,
}

impl Analytics {
    /// 订单完成率（百分比，无订单时为 0）
    pub fn order_completion_rate(&self) -> f64 {
        ratio(self.orders.completed, self.orders.total)
    }

    pub fn consultation_completion_rate(&self) -> f64 {
        ratio(self.consultations.completed, self.consultations.total)
    }
}

fn ratio(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

// =========================================================
// 顾问仪表盘
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConsultation {
    pub id: i64,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub scheduled_at: Option<Timestamp>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// `GET /api/consultants/dashboard`（键名为 camelCase）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultantDashboard {
    #[serde(default)]
    pub total_consultations: u64,
    #[serde(default)]
    pub completed_consultations: u64,
    #[serde(default)]
    pub pending_consultations: u64,
    #[serde(default)]
    pub total_earnings: f64,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub recent_consultations: Vec<DashboardConsultation>,
    #[serde(default)]
    pub upcoming_consultations: Vec<DashboardConsultation>,
}

/// 客户列表中的一行
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSummary {
    pub name: String,
    pub last_consultation: Option<Timestamp>,
    pub consultations: usize,
}

impl ConsultantDashboard {
    /// 最近 + 即将到来的咨询，按 id 去重
    pub fn all_consultations(&self) -> Vec<DashboardConsultation> {
        let mut seen = std::collections::HashSet::new();
        self.recent_consultations
            .iter()
            .chain(self.upcoming_consultations.iter())
            .filter(|c| seen.insert(c.id))
            .cloned()
            .collect()
    }

    /// 从咨询记录中按客户名聚合客户，保持首次出现的顺序
    pub fn clients(&self) -> Vec<ClientSummary> {
        let consultations = self.all_consultations();
        let mut clients: Vec<ClientSummary> = Vec::new();
        for c in consultations.iter().filter(|c| !c.client_name.is_empty()) {
            match clients.iter_mut().find(|s| s.name == c.client_name) {
                Some(summary) => {
                    summary.consultations += 1;
                    if c.scheduled_at > summary.last_consultation {
                        summary.last_consultation = c.scheduled_at;
                    }
                }
                None => clients.push(ClientSummary {
                    name: c.client_name.clone(),
                    last_consultation: c.scheduled_at,
                    consultations: 1,
                }),
            }
        }
        clients
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn admin_dashboard_counts() {
        let stats: AdminDashboardStats = serde_json::from_value(json!({
            "users": { "total": 10, "active": 8 },
            "consultants": { "total": 3, "active": 2 },
            "products": { "total": 20, "active": 18 },
            "orders": { "total": 7, "pending": 2 },
            "consultations": { "total": 5, "scheduled": 4 }
        }))
        .unwrap();
        assert_eq!(stats.orders.active, 2);
        assert_eq!(stats.consultations.active, 4);
        assert_eq!(stats.users.total, 10);
    }

    #[test]
    fn analytics_rates_handle_zero() {
        let analytics = Analytics::default();
        assert_eq!(analytics.order_completion_rate(), 0.0);

        let analytics: Analytics = serde_json::from_value(json!({
            "revenue": { "total": 1200.5, "monthly": 300.0 },
            "orders": { "total": 4, "completed": 3, "pending": 1 },
            "users": { "new_this_month": 2 },
            "consultations": { "total": 2, "completed": 1 },
            "top_products": [{ "name": "Whey", "total_sold": 9, "total_revenue": 450.0 }],
            "top_consultants": []
        }))
        .unwrap();
        assert_eq!(analytics.order_completion_rate(), 75.0);
        assert_eq!(analytics.consultation_completion_rate(), 50.0);
    }

    #[test]
    fn clients_are_grouped_by_name() {
        let dashboard: ConsultantDashboard = serde_json::from_value(json!({
            "totalConsultations": 3,
            "averageRating": 4.5,
            "recentConsultations": [
                { "id": 1, "client_name": "Jane Doe", "scheduled_at": "2024-01-01T10:00:00", "status": "completed" },
                { "id": 2, "client_name": "Sam Roe", "scheduled_at": null, "status": "scheduled" }
            ],
            "upcomingConsultations": [
                { "id": 2, "client_name": "Sam Roe", "scheduled_at": null, "status": "scheduled" },
                { "id": 3, "client_name": "Jane Doe", "scheduled_at": "2024-02-01T10:00:00", "status": "scheduled" }
            ]
        }))
        .unwrap();

        let clients = dashboard.clients();
        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0].name, "Jane Doe");
        assert_eq!(clients[0].consultations, 2);
        assert_eq!(
            clients[0].last_consultation.map(|t| t.format_date()),
            Some("2/1/2024".to_string())
        );
        assert_eq!(clients[1].consultations, 1);
    }
}
