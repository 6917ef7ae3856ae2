use serde::Serialize;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealMetrics {
    pub total_meals: usize,
    pub meals_on_diet: usize,
    pub meals_off_diet: usize,
    pub best_sequence_on_diet: usize,
}

/// Single pass over on-diet flags in list order.
pub fn summarize<I>(flags: I) -> MealMetrics
where
    I: IntoIterator<Item = bool>,
{
    let mut m = MealMetrics::default();
    let mut current = 0;

    for on_diet in flags {
        m.total_meals += 1;
        if on_diet {
            m.meals_on_diet += 1;
            current += 1;
        } else {
            m.meals_off_diet += 1;
            m.best_sequence_on_diet = m.best_sequence_on_diet.max(current);
            current = 0;
        }
    }
    // streak that runs to the last meal
    m.best_sequence_on_diet = m.best_sequence_on_diet.max(current);
    m
}
