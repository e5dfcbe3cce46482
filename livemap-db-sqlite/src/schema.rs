table! {
    features (id) {
        id -> Text,
        name -> Text,
        category -> Text,
        geometry -> Text,
        min_lng -> Double,
        min_lat -> Double,
        max_lng -> Double,
        max_lat -> Double,
    }
}
