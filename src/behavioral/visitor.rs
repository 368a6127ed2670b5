// Visitor: pricing, spec listing and upgrade checks run over the same fixed
// set of computer parts without the parts knowing about any of them.

use crate::config::Settings;
use crate::error::Result;
use crate::narration::Narrator;

// ============================================
// 1. The parts
// ============================================

#[derive(Debug, Clone, PartialEq)]
pub struct Cpu {
    pub model: String,
    pub price: f64,
    pub cores: u32,
    pub ghz: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ram {
    pub model: String,
    pub price: f64,
    pub gb: u32,
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Storage {
    pub model: String,
    pub price: f64,
    pub gb: u32,
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gpu {
    pub model: String,
    pub price: f64,
    pub memory_gb: u32,
    pub brand: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComputerPart {
    Cpu(Cpu),
    Ram(Ram),
    Storage(Storage),
    Gpu(Gpu),
}

impl ComputerPart {
    pub fn cpu(model: &str, price: f64, cores: u32, ghz: f64) -> Self {
        ComputerPart::Cpu(Cpu {
            model: model.to_string(),
            price,
            cores,
            ghz,
        })
    }

    pub fn ram(model: &str, price: f64, gb: u32, kind: &str) -> Self {
        ComputerPart::Ram(Ram {
            model: model.to_string(),
            price,
            gb,
            kind: kind.to_string(),
        })
    }

    pub fn storage(model: &str, price: f64, gb: u32, kind: &str) -> Self {
        ComputerPart::Storage(Storage {
            model: model.to_string(),
            price,
            gb,
            kind: kind.to_string(),
        })
    }

    pub fn gpu(model: &str, price: f64, memory_gb: u32, brand: &str) -> Self {
        ComputerPart::Gpu(Gpu {
            model: model.to_string(),
            price,
            memory_gb,
            brand: brand.to_string(),
        })
    }
}

// ============================================
// 2. The visitor trait
// ============================================

pub trait PartVisitor {
    fn visit(&mut self, part: &ComputerPart, narrator: &Narrator) {
        match part {
            ComputerPart::Cpu(cpu) => self.visit_cpu(cpu, narrator),
            ComputerPart::Ram(ram) => self.visit_ram(ram, narrator),
            ComputerPart::Storage(storage) => self.visit_storage(storage, narrator),
            ComputerPart::Gpu(gpu) => self.visit_gpu(gpu, narrator),
        }
    }

    fn visit_cpu(&mut self, cpu: &Cpu, narrator: &Narrator);
    fn visit_ram(&mut self, ram: &Ram, narrator: &Narrator);
    fn visit_storage(&mut self, storage: &Storage, narrator: &Narrator);
    fn visit_gpu(&mut self, gpu: &Gpu, narrator: &Narrator);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Computer {
    pub name: String,
    pub parts: Vec<ComputerPart>,
}

impl Computer {
    pub fn new(name: impl Into<String>, parts: Vec<ComputerPart>) -> Self {
        Self {
            name: name.into(),
            parts,
        }
    }

    /// Visits every part in order.
    pub fn accept(&self, visitor: &mut dyn PartVisitor, narrator: &Narrator) {
        for part in &self.parts {
            visitor.visit(part, narrator);
        }
    }

    pub fn gaming_pc() -> Self {
        Self::new(
            "Gaming PC",
            vec![
                ComputerPart::cpu("Intel Core i9-13900K", 589.99, 24, 5.8),
                ComputerPart::ram("Corsair Vengeance DDR5", 159.99, 32, "DDR5"),
                ComputerPart::storage("Samsung 980 Pro", 149.99, 1000, "SSD"),
                ComputerPart::gpu("NVIDIA RTX 4080", 1199.99, 16, "NVIDIA"),
            ],
        )
    }

    pub fn office_pc() -> Self {
        Self::new(
            "Office PC",
            vec![
                ComputerPart::cpu("Intel Core i3-10100", 129.99, 4, 3.6),
                ComputerPart::ram("Kingston Value DDR3", 49.99, 8, "DDR3"),
                ComputerPart::storage("Seagate Barracuda", 54.99, 1000, "HDD"),
                ComputerPart::gpu("Intel UHD Graphics", 0.0, 2, "Intel"),
            ],
        )
    }
}

// ============================================
// 3. Visitors
// ============================================

#[derive(Debug, Default)]
pub struct PriceCalculator {
    total: f64,
}

impl PriceCalculator {
    pub fn total(&self) -> f64 {
        self.total
    }

    fn add(&mut self, model: &str, price: f64, narrator: &Narrator) {
        self.total += price;
        narrator.bullet(format_args!("{}: ${:.2}", model, price));
    }
}

impl PartVisitor for PriceCalculator {
    fn visit_cpu(&mut self, cpu: &Cpu, narrator: &Narrator) {
        self.add(&cpu.model, cpu.price, narrator);
    }

    fn visit_ram(&mut self, ram: &Ram, narrator: &Narrator) {
        self.add(&ram.model, ram.price, narrator);
    }

    fn visit_storage(&mut self, storage: &Storage, narrator: &Narrator) {
        self.add(&storage.model, storage.price, narrator);
    }

    fn visit_gpu(&mut self, gpu: &Gpu, narrator: &Narrator) {
        self.add(&gpu.model, gpu.price, narrator);
    }
}

#[derive(Debug, Default)]
pub struct SpecsDisplay;

impl PartVisitor for SpecsDisplay {
    fn visit_cpu(&mut self, cpu: &Cpu, narrator: &Narrator) {
        narrator.bullet(format_args!(
            "CPU: {} ({} cores @ {:.1} GHz)",
            cpu.model, cpu.cores, cpu.ghz
        ));
    }

    fn visit_ram(&mut self, ram: &Ram, narrator: &Narrator) {
        narrator.bullet(format_args!("RAM: {} ({} GB {})", ram.model, ram.gb, ram.kind));
    }

    fn visit_storage(&mut self, storage: &Storage, narrator: &Narrator) {
        narrator.bullet(format_args!(
            "Storage: {} ({} GB {})",
            storage.model, storage.gb, storage.kind
        ));
    }

    fn visit_gpu(&mut self, gpu: &Gpu, narrator: &Narrator) {
        narrator.bullet(format_args!(
            "GPU: {} ({} GB, {})",
            gpu.model, gpu.memory_gb, gpu.brand
        ));
    }
}

/// Counts parts that fall below the recommended minimums.
#[derive(Debug, Default)]
pub struct UpgradeCheck {
    recommended: usize,
}

impl UpgradeCheck {
    pub fn recommended(&self) -> usize {
        self.recommended
    }

    fn verdict(&mut self, needs_upgrade: bool, label: &str, reason: &str, narrator: &Narrator) {
        if needs_upgrade {
            self.recommended += 1;
            narrator.bullet(format_args!("{}: upgrade recommended ({})", label, reason));
        } else {
            narrator.bullet(format_args!("{}: OK", label));
        }
    }
}

impl PartVisitor for UpgradeCheck {
    fn visit_cpu(&mut self, cpu: &Cpu, narrator: &Narrator) {
        let weak = cpu.cores < 4 || cpu.ghz < 2.5;
        self.verdict(weak, "CPU", "fewer than 4 cores or below 2.5 GHz", narrator);
    }

    fn visit_ram(&mut self, ram: &Ram, narrator: &Narrator) {
        let weak = ram.gb < 8 || ram.kind == "DDR3";
        self.verdict(weak, "RAM", "less than 8 GB or DDR3", narrator);
    }

    fn visit_storage(&mut self, storage: &Storage, narrator: &Narrator) {
        let weak = storage.kind == "HDD" || storage.gb < 256;
        self.verdict(weak, "Storage", "HDD or less than 256 GB", narrator);
    }

    fn visit_gpu(&mut self, gpu: &Gpu, narrator: &Narrator) {
        let weak = gpu.memory_gb < 4;
        self.verdict(weak, "GPU", "less than 4 GB of memory", narrator);
    }
}

pub fn demo(narrator: &Narrator, _settings: &Settings) -> Result<()> {
    for computer in [Computer::gaming_pc(), Computer::office_pc()] {
        narrator.section(&computer.name);

        narrator.say("Specifications:");
        computer.accept(&mut SpecsDisplay, narrator);

        narrator.say("Prices:");
        let mut prices = PriceCalculator::default();
        computer.accept(&mut prices, narrator);
        narrator.say(format_args!("Total: ${:.2}", prices.total()));

        narrator.say("Upgrade check:");
        let mut upgrades = UpgradeCheck::default();
        computer.accept(&mut upgrades, narrator);
        narrator.say(format_args!(
            "{} upgrade(s) recommended",
            upgrades.recommended()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaming_pc_total() {
        let narrator = Narrator::captured();
        let mut prices = PriceCalculator::default();
        Computer::gaming_pc().accept(&mut prices, &narrator);

        assert!((prices.total() - 2099.96).abs() < 1e-9);
    }

    #[test]
    fn test_upgrade_counts() {
        let narrator = Narrator::captured();

        let mut gaming = UpgradeCheck::default();
        Computer::gaming_pc().accept(&mut gaming, &narrator);
        assert_eq!(gaming.recommended(), 0);

        let mut office = UpgradeCheck::default();
        Computer::office_pc().accept(&mut office, &narrator);
        assert_eq!(office.recommended(), 3);
    }

    #[test]
    fn test_visits_follow_part_order() {
        let narrator = Narrator::captured();
        Computer::office_pc().accept(&mut SpecsDisplay, &narrator);

        let lines = narrator.lines();
        assert!(lines[0].contains("CPU: Intel Core i3-10100"));
        assert!(lines[3].contains("GPU: Intel UHD Graphics"));
    }

    #[test]
    fn test_cpu_boundary() {
        let narrator = Narrator::captured();
        let pc = Computer::new("edge", vec![ComputerPart::cpu("old", 10.0, 4, 2.4)]);
        let mut check = UpgradeCheck::default();
        pc.accept(&mut check, &narrator);
        assert_eq!(check.recommended(), 1);
    }
}
