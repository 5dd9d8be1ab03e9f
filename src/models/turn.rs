#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

/// One message in the conversation. Only the most recent model turn is
/// mutated (by [`Turn::append`]) while a response stream is in flight.
#[derive(Debug, Clone)]
pub struct Turn {
    id: String,
    role: Role,
    text: String,
    timestamp: chrono::DateTime<chrono::Utc>,
}

impl Turn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn new_user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn new_model(text: impl Into<String>) -> Self {
        Self::new(Role::Model, text)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_model(&self) -> bool {
        self.role == Role::Model
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::Utc> {
        self.timestamp
    }

    pub fn append(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.text += &text.replace('\t', "  ");
    }
}
