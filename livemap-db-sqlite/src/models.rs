use super::schema::*;

#[derive(Insertable)]
#[diesel(table_name = features)]
pub struct NewFeature<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub category: &'a str,
    pub geometry: String,
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,
}

#[derive(Queryable)]
pub struct Feature {
    pub id: String,
    pub name: String,
    pub category: String,
    pub geometry: String,
}
