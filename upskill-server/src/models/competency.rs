//! Competency: a skill tag linked to tracks through seed data only

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Competency {
    pub id: i64,
    pub name: String,
    /// e.g. Tecnologia, Humana, Gestão
    pub category: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCompetency {
    pub name: String,
    pub category: String,
    pub description: String,
}
