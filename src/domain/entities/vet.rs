//! Veterinarians and their specialties.

/// A medical specialty ("radiology", "surgery", ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Specialty {
    pub id: i64,
    pub name: String,
}

impl Specialty {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A veterinarian working at the clinic.
#[derive(Debug, Clone, PartialEq)]
pub struct Vet {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    specialties: Vec<Specialty>,
}

impl Vet {
    pub fn new(id: i64, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            specialties: Vec::new(),
        }
    }

    /// Adds a specialty; a specialty already present is not duplicated.
    pub fn add_specialty(&mut self, specialty: Specialty) {
        if self.specialties.contains(&specialty) {
            return;
        }
        let at = self
            .specialties
            .partition_point(|s| s.name <= specialty.name);
        self.specialties.insert(at, specialty);
    }

    /// Specialties sorted by name.
    pub fn specialties(&self) -> &[Specialty] {
        &self.specialties
    }

    pub fn nr_of_specialties(&self) -> usize {
        self.specialties.len()
    }
}

/// The full vet list, as exposed to API clients.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vets {
    pub vet_list: Vec<Vet>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_specialties_by_default() {
        let vet = Vet::new(1, "James", "Carter");
        assert!(vet.specialties().is_empty());
        assert_eq!(vet.nr_of_specialties(), 0);
    }

    #[test]
    fn test_specialties_sorted_by_name() {
        let mut vet = Vet::new(2, "Linda", "Douglas");
        vet.add_specialty(Specialty::new(3, "Surgery"));
        vet.add_specialty(Specialty::new(2, "Dentistry"));
        vet.add_specialty(Specialty::new(1, "Anesthesia"));

        let names: Vec<_> = vet.specialties().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Anesthesia", "Dentistry", "Surgery"]);
        assert_eq!(vet.nr_of_specialties(), 3);
    }

    #[test]
    fn test_duplicate_specialty_ignored() {
        let mut vet = Vet::new(3, "Rafael", "Ortega");
        vet.add_specialty(Specialty::new(1, "Radiology"));
        vet.add_specialty(Specialty::new(1, "Radiology"));
        assert_eq!(vet.nr_of_specialties(), 1);
    }

    #[test]
    fn test_vets_starts_empty() {
        let mut vets = Vets::default();
        assert!(vets.vet_list.is_empty());
        vets.vet_list.push(Vet::new(1, "A", "B"));
        assert_eq!(vets.vet_list.len(), 1);
    }
}
