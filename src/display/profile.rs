//! Profile display formatting

use crate::models::Profile;
use crate::reports::Totals;

/// Format the profile with its lifetime stats
pub fn format_profile(profile: &Profile, totals: &Totals) -> String {
    let currency = profile.currency();
    let mut output = String::new();

    output.push_str(&format!("Name:             {}\n", profile.name));
    output.push_str(&format!("Email:            {}\n", profile.email));
    output.push_str(&format!("Default currency: {}\n", currency));

    output.push_str("\nLifetime Stats\n");
    output.push_str(&"-".repeat(40));
    output.push('\n');
    output.push_str(&format!(
        "Total Income:     {}\n",
        totals.total_income.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "Total Expenses:   {}\n",
        totals.total_expenses.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "Total Savings:    {}\n",
        totals.savings.format_with_symbol(currency)
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Document;

    #[test]
    fn test_format_profile() {
        let doc = Document::sample();
        let output = format_profile(&doc.profile, &Totals::compute(&doc));

        assert!(output.contains("Name:             Aarav Mehta"));
        assert!(output.contains("aarav.mehta@example.com"));
        assert!(output.contains("Total Income:     ₹ 35,000"));
        assert!(output.contains("Total Expenses:   ₹ 5,200"));
        assert!(output.contains("Total Savings:    ₹ 29,800"));
    }
}
