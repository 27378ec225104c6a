use std::{path::Path, thread, time::Duration};

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    constants::MOCK_LATENCY,
    domain::now_millis,
    storage::{self, StorageError},
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Email already registered")]
    EmailTaken,
    #[error("Email not found")]
    UnknownEmail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffRole {
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "STAFF")]
    Staff,
}

impl StaffRole {
    pub fn label(self) -> &'static str {
        match self {
            StaffRole::Admin => "ADMIN",
            StaffRole::Staff => "STAFF",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffUser {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: StaffRole,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: StaffUser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Customer {
    pub id: u32,
    pub name: &'static str,
    pub email: &'static str,
    pub contact: &'static str,
    pub consent: bool,
    pub bookings: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomerDetail {
    pub customer: Customer,
    pub address: &'static str,
    pub history: &'static [BookingRecord],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRecord {
    pub date: &'static str,
    pub package: &'static str,
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDraft {
    pub name: String,
    pub email: String,
    pub contact: String,
    pub consent: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedCustomer {
    pub id: i64,
    pub draft: CustomerDraft,
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageRecord {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub price: u32,
    pub image: &'static str,
    pub category: &'static str,
    pub inclusions: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddonRecord {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub price: u32,
    pub category: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_customers: u32,
    pub total_bookings: u32,
    pub revenue: u64,
    pub popular_packages: &'static [PopularPackage],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopularPackage {
    pub package_id: u32,
    pub name: &'static str,
    pub bookings: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommendation {
    pub package_id: u32,
    pub name: &'static str,
    pub reason: &'static str,
    pub image: &'static str,
}

struct Account {
    email: &'static str,
    password: &'static str,
    id: u32,
    name: &'static str,
    role: StaffRole,
}

impl Account {
    fn user(&self) -> StaffUser {
        StaffUser {
            id: self.id,
            name: self.name.to_string(),
            email: self.email.to_string(),
            role: self.role,
        }
    }
}

const ACCOUNTS: [Account; 3] = [
    Account {
        email: "admin@heigen.com",
        password: "admin123",
        id: 1,
        name: "HANA BABILONIA",
        role: StaffRole::Admin,
    },
    Account {
        email: "staff@heigen.com",
        password: "staff123",
        id: 2,
        name: "JOHN DOE",
        role: StaffRole::Staff,
    },
    Account {
        email: "test@heigen.com",
        password: "test123",
        id: 3,
        name: "TEST USER",
        role: StaffRole::Staff,
    },
];

const CUSTOMERS: [Customer; 8] = [
    Customer {
        id: 1,
        name: "Maria Santos",
        email: "maria@email.com",
        contact: "0917-123-4567",
        consent: true,
        bookings: 3,
    },
    Customer {
        id: 2,
        name: "Juan Dela Cruz",
        email: "juan@email.com",
        contact: "0918-234-5678",
        consent: false,
        bookings: 1,
    },
    Customer {
        id: 3,
        name: "Ana Rodriguez",
        email: "ana@email.com",
        contact: "0919-345-6789",
        consent: true,
        bookings: 5,
    },
    Customer {
        id: 4,
        name: "Pedro Martinez",
        email: "pedro@email.com",
        contact: "0920-456-7890",
        consent: true,
        bookings: 2,
    },
    Customer {
        id: 5,
        name: "Lisa Garcia",
        email: "lisa@email.com",
        contact: "0921-567-8901",
        consent: false,
        bookings: 0,
    },
    Customer {
        id: 6,
        name: "Carlos Reyes",
        email: "carlos@email.com",
        contact: "0922-678-9012",
        consent: true,
        bookings: 4,
    },
    Customer {
        id: 7,
        name: "Sofia Cruz",
        email: "sofia@email.com",
        contact: "0923-789-0123",
        consent: true,
        bookings: 6,
    },
    Customer {
        id: 8,
        name: "Miguel Ramos",
        email: "miguel@email.com",
        contact: "0924-890-1234",
        consent: false,
        bookings: 1,
    },
];

const BOOKING_HISTORY: [BookingRecord; 2] = [
    BookingRecord {
        date: "2024-10-15",
        package: "Premium Package",
        amount: 15000,
    },
    BookingRecord {
        date: "2024-08-20",
        package: "Standard Package",
        amount: 10000,
    },
];

const PACKAGES: [PackageRecord; 6] = [
    PackageRecord {
        id: 1,
        name: "BASIC PACKAGE",
        description: "Perfect for small events and intimate gatherings",
        price: 5000,
        image: "https://images.unsplash.com/photo-1511285560929-80b456fea0bc?w=400",
        category: "basic",
        inclusions: &["2 hours coverage", "50 edited photos", "1 photographer"],
    },
    PackageRecord {
        id: 2,
        name: "STANDARD PACKAGE",
        description: "Great for medium-sized celebrations",
        price: 10000,
        image: "https://images.unsplash.com/photo-1519741497674-611481863552?w=400",
        category: "standard",
        inclusions: &[
            "4 hours coverage",
            "100 edited photos",
            "1 photographer",
            "Online gallery",
        ],
    },
    PackageRecord {
        id: 3,
        name: "PREMIUM PACKAGE",
        description: "Full service package for memorable events",
        price: 15000,
        image: "https://images.unsplash.com/photo-1464366400600-7168b8af9bc3?w=400",
        category: "premium",
        inclusions: &[
            "6 hours coverage",
            "200 edited photos",
            "2 photographers",
            "Online gallery",
            "USB drive",
        ],
    },
    PackageRecord {
        id: 4,
        name: "DELUXE PACKAGE",
        description: "Ultimate experience with premium features",
        price: 25000,
        image: "https://images.unsplash.com/photo-1522673607200-164d1b6ce486?w=400",
        category: "deluxe",
        inclusions: &[
            "8 hours coverage",
            "300 edited photos",
            "2 photographers",
            "Videographer",
            "Online gallery",
            "Premium USB",
            "Photo book",
        ],
    },
    PackageRecord {
        id: 5,
        name: "WEDDING BASIC",
        description: "Essential wedding photography package",
        price: 18000,
        image: "https://images.unsplash.com/photo-1606800052052-a08af7148866?w=400",
        category: "wedding",
        inclusions: &[
            "Full day coverage",
            "250 edited photos",
            "2 photographers",
            "Engagement shoot",
        ],
    },
    PackageRecord {
        id: 6,
        name: "WEDDING PREMIUM",
        description: "Complete wedding documentation",
        price: 35000,
        image: "https://images.unsplash.com/photo-1519225421980-715cb0215aed?w=400",
        category: "wedding",
        inclusions: &[
            "Full day coverage",
            "500 edited photos",
            "3 photographers",
            "2 videographers",
            "Engagement shoot",
            "Same day edit",
            "Wedding album",
        ],
    },
];

const ADDONS: [AddonRecord; 9] = [
    AddonRecord {
        id: 1,
        name: "EXTRA HOUR",
        description: "Additional shooting time",
        price: 2000,
        category: "time",
    },
    AddonRecord {
        id: 2,
        name: "PHOTO ALBUM",
        description: "Premium 12x12 photo album",
        price: 3500,
        category: "product",
    },
    AddonRecord {
        id: 3,
        name: "VIDEO PACKAGE",
        description: "Professional video editing with highlights",
        price: 8000,
        category: "video",
    },
    AddonRecord {
        id: 4,
        name: "DRONE SHOTS",
        description: "Aerial photography and videography",
        price: 5000,
        category: "special",
    },
    AddonRecord {
        id: 5,
        name: "PHOTO BOOTH",
        description: "3 hours unlimited prints",
        price: 6000,
        category: "entertainment",
    },
    AddonRecord {
        id: 6,
        name: "SAME DAY EDIT",
        description: "Video highlights on event day",
        price: 10000,
        category: "video",
    },
    AddonRecord {
        id: 7,
        name: "EXTRA PHOTOGRAPHER",
        description: "Additional photographer for 4 hours",
        price: 4000,
        category: "staff",
    },
    AddonRecord {
        id: 8,
        name: "RUSH EDITING",
        description: "Get photos within 1 week",
        price: 3000,
        category: "service",
    },
    AddonRecord {
        id: 9,
        name: "CANVAS PRINT",
        description: "24x36 canvas wall art",
        price: 2500,
        category: "product",
    },
];

const DASHBOARD_STATS: DashboardStats = DashboardStats {
    total_customers: 127,
    total_bookings: 45,
    revenue: 567000,
    popular_packages: &[
        PopularPackage {
            package_id: 3,
            name: "PREMIUM PACKAGE",
            bookings: 15,
        },
        PopularPackage {
            package_id: 2,
            name: "STANDARD PACKAGE",
            bookings: 12,
        },
        PopularPackage {
            package_id: 6,
            name: "WEDDING PREMIUM",
            bookings: 8,
        },
    ],
};

const RECOMMENDATIONS: [Recommendation; 2] = [
    Recommendation {
        package_id: 3,
        name: "PREMIUM PACKAGE",
        reason: "Most popular this month",
        image: "https://images.unsplash.com/photo-1464366400600-7168b8af9bc3?w=400",
    },
    Recommendation {
        package_id: 6,
        name: "WEDDING PREMIUM",
        reason: "High customer satisfaction",
        image: "https://images.unsplash.com/photo-1519225421980-715cb0215aed?w=400",
    },
];

pub struct MockCatalog {
    simulate_latency: bool,
}

impl MockCatalog {
    pub fn instant() -> Self {
        MockCatalog {
            simulate_latency: false,
        }
    }

    pub fn with_latency() -> Self {
        MockCatalog {
            simulate_latency: true,
        }
    }

    fn pause(&self) {
        if !self.simulate_latency {
            return;
        }
        let mut rng = rand::thread_rng();
        let ms = rng.gen_range(MOCK_LATENCY.min_ms..=MOCK_LATENCY.max_ms);
        thread::sleep(Duration::from_millis(ms));
    }

    pub fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        self.pause();
        let account = ACCOUNTS
            .iter()
            .find(|a| a.email == email && a.password == password)
            .ok_or(ApiError::InvalidCredentials)?;

        Ok(AuthSession {
            token: format!("mock_token_{}", now_millis()),
            user: account.user(),
        })
    }

    pub fn signup(
        &self,
        _name: &str,
        email: &str,
        _password: &str,
    ) -> Result<&'static str, ApiError> {
        self.pause();
        if ACCOUNTS.iter().any(|a| a.email == email) {
            return Err(ApiError::EmailTaken);
        }
        Ok("Account created successfully")
    }

    pub fn reset_password(
        &self,
        email: &str,
        _new_password: &str,
    ) -> Result<&'static str, ApiError> {
        self.pause();
        if !ACCOUNTS.iter().any(|a| a.email == email) {
            return Err(ApiError::UnknownEmail);
        }
        Ok("Password reset successfully")
    }

    pub fn customers(&self, search: &str) -> Vec<Customer> {
        self.pause();
        let needle = search.to_lowercase();
        CUSTOMERS
            .iter()
            .filter(|c| {
                needle.is_empty()
                    || c.name.to_lowercase().contains(&needle)
                    || c.email.to_lowercase().contains(&needle)
                    || c.contact.contains(search)
            })
            .copied()
            .collect()
    }

    pub fn customer(&self, id: u32) -> Option<CustomerDetail> {
        self.pause();
        let customer = CUSTOMERS.iter().find(|c| c.id == id).copied()?;
        Some(CustomerDetail {
            customer,
            address: "123 Main St, Manila",
            history: &BOOKING_HISTORY,
        })
    }

    pub fn save_customer(&self, draft: CustomerDraft, id: Option<u32>) -> SavedCustomer {
        self.pause();
        let (id, message) = match id {
            Some(id) => (i64::from(id), "Customer updated successfully"),
            None => (now_millis(), "Customer created successfully"),
        };
        SavedCustomer { id, draft, message }
    }

    pub fn delete_customer(&self, _id: u32) -> &'static str {
        self.pause();
        "Customer deleted successfully"
    }

    pub fn packages(&self, search: &str, category: Option<&str>) -> Vec<PackageRecord> {
        self.pause();
        let needle = search.to_lowercase();
        PACKAGES
            .iter()
            .filter(|p| {
                needle.is_empty()
                    || p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .filter(|p| category.is_none_or(|c| p.category == c))
            .copied()
            .collect()
    }

    pub fn package(&self, id: u32) -> Option<PackageRecord> {
        self.pause();
        PACKAGES.iter().find(|p| p.id == id).copied()
    }

    pub fn addons(&self, search: &str) -> Vec<AddonRecord> {
        self.pause();
        let needle = search.to_lowercase();
        ADDONS
            .iter()
            .filter(|a| {
                needle.is_empty()
                    || a.name.to_lowercase().contains(&needle)
                    || a.description.to_lowercase().contains(&needle)
            })
            .copied()
            .collect()
    }

    pub fn dashboard_stats(&self) -> DashboardStats {
        self.pause();
        DASHBOARD_STATS
    }

    pub fn recommendations(&self) -> &'static [Recommendation] {
        self.pause();
        &RECOMMENDATIONS
    }
}

pub fn load_session(path: &Path) -> Option<AuthSession> {
    if !storage::file_exists(path) {
        return None;
    }
    match storage::read_json(path) {
        Ok(session) => Some(session),
        Err(e) => {
            eprintln!("Warning: Could not restore session: {}", e);
            None
        }
    }
}

pub fn save_session(path: &Path, session: &AuthSession) -> Result<(), StorageError> {
    storage::write_json_atomic(path, session)
}

pub fn clear_session(path: &Path) -> Result<(), StorageError> {
    storage::delete_file_if_exists(path)
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf, time::SystemTime};

    use super::*;

    fn unique_session_path() -> PathBuf {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        PathBuf::from(format!("/tmp/darkroom_session_{}.json", now))
    }

    #[test]
    fn test_login_issues_token_and_role() {
        let api = MockCatalog::instant();
        let session = api.login("admin@heigen.com", "admin123").unwrap();

        assert!(session.token.starts_with("mock_token_"));
        assert_eq!(session.user.name, "HANA BABILONIA");
        assert_eq!(session.user.role, StaffRole::Admin);

        let staff = api.login("staff@heigen.com", "staff123").unwrap();
        assert_eq!(staff.user.role, StaffRole::Staff);
    }

    #[test]
    fn test_login_rejects_bad_credentials() {
        let api = MockCatalog::instant();
        let err = api.login("admin@heigen.com", "wrong").unwrap_err();
        assert_eq!(err.to_string(), "Invalid email or password");
        assert!(api.login("nobody@heigen.com", "admin123").is_err());
    }

    #[test]
    fn test_signup_rejects_registered_emails() {
        let api = MockCatalog::instant();
        let message = api.signup("New Staff", "new@heigen.com", "pw123").unwrap();
        assert_eq!(message, "Account created successfully");

        let err = api.signup("Dup", "admin@heigen.com", "pw123").unwrap_err();
        assert_eq!(err.to_string(), "Email already registered");
    }

    #[test]
    fn test_password_reset_needs_a_known_email() {
        let api = MockCatalog::instant();
        let message = api.reset_password("staff@heigen.com", "next123").unwrap();
        assert_eq!(message, "Password reset successfully");

        let err = api.reset_password("ghost@heigen.com", "next123").unwrap_err();
        assert_eq!(err.to_string(), "Email not found");
    }

    #[test]
    fn test_save_customer_mints_an_id_on_create() {
        let api = MockCatalog::instant();
        let draft = CustomerDraft {
            name: "Rita Flores".to_string(),
            email: "rita@email.com".to_string(),
            contact: "0925-901-2345".to_string(),
            consent: true,
        };

        let created = api.save_customer(draft.clone(), None);
        assert!(created.id > 0);
        assert_eq!(created.draft, draft);
        assert_eq!(created.message, "Customer created successfully");

        let updated = api.save_customer(draft, Some(4));
        assert_eq!(updated.id, 4);
        assert_eq!(updated.message, "Customer updated successfully");
    }

    #[test]
    fn test_delete_customer_always_acknowledges() {
        let api = MockCatalog::instant();
        assert_eq!(api.delete_customer(2), "Customer deleted successfully");
        assert_eq!(api.delete_customer(999), "Customer deleted successfully");
    }

    #[test]
    fn test_empty_search_returns_everything() {
        let api = MockCatalog::instant();
        assert_eq!(api.customers("").len(), 8);
        assert_eq!(api.packages("", None).len(), 6);
        assert_eq!(api.addons("").len(), 9);
    }

    #[test]
    fn test_customer_search_is_case_insensitive() {
        let api = MockCatalog::instant();
        let hits = api.customers("MARIA");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Maria Santos");
    }

    #[test]
    fn test_customer_search_matches_contact_digits() {
        let api = MockCatalog::instant();
        let hits = api.customers("0921-567");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Lisa Garcia");
    }

    #[test]
    fn test_customer_detail_adds_address_and_history() {
        let api = MockCatalog::instant();
        let detail = api.customer(3).unwrap();

        assert_eq!(detail.customer.name, "Ana Rodriguez");
        assert_eq!(detail.address, "123 Main St, Manila");
        assert_eq!(detail.history.len(), 2);
        assert_eq!(detail.history[0].package, "Premium Package");

        assert!(api.customer(99).is_none());
    }

    #[test]
    fn test_package_search_scans_descriptions() {
        let api = MockCatalog::instant();
        let hits = api.packages("intimate", None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "BASIC PACKAGE");
    }

    #[test]
    fn test_package_category_filter_is_exact() {
        let api = MockCatalog::instant();
        assert_eq!(api.packages("", Some("wedding")).len(), 2);
        assert_eq!(api.packages("", Some("wed")).len(), 0);
        assert_eq!(api.packages("premium", Some("wedding")).len(), 1);
    }

    #[test]
    fn test_addon_search_scans_name_and_description() {
        let api = MockCatalog::instant();
        let hits = api.addons("video");
        let names: Vec<&str> = hits.iter().map(|a| a.name).collect();
        assert_eq!(names, ["VIDEO PACKAGE", "DRONE SHOTS", "SAME DAY EDIT"]);
    }

    #[test]
    fn test_stats_and_recommendations_are_fixed() {
        let api = MockCatalog::instant();
        let stats = api.dashboard_stats();

        assert_eq!(stats.total_customers, 127);
        assert_eq!(stats.revenue, 567000);
        assert_eq!(stats.popular_packages[0].name, "PREMIUM PACKAGE");

        let recs = api.recommendations();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].reason, "Most popular this month");
    }

    #[test]
    fn test_session_round_trips_on_disk() {
        let path = unique_session_path();
        let api = MockCatalog::instant();
        let session = api.login("test@heigen.com", "test123").unwrap();

        save_session(&path, &session).unwrap();
        assert_eq!(load_session(&path), Some(session));

        clear_session(&path).unwrap();
        assert_eq!(load_session(&path), None);

        fs::remove_file(&path).ok();
    }
}
