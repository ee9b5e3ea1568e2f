//! Small hand-written catalog shared by the engine tests.

use advisor_core::{Catalogs, Cpu, Gpu, PowerProfile, PowerTable, Ram};

pub fn cpu(name: &str, tier: u8, generation: u32, socket: &str, cores: u32, boost: f64, ram_type: &str) -> Cpu {
    Cpu {
        name: name.to_string(),
        tier,
        generation: Some(generation),
        socket: Some(socket.to_string()),
        core_count: Some(cores),
        boost_clock_ghz: Some(boost),
        tdp_w: Some(105),
        ram_type: Some(ram_type.to_string()),
    }
}

pub fn gpu(name: &str, tier: u8, generation: u32, memory: f64, boost: f64) -> Gpu {
    Gpu {
        name: name.to_string(),
        tier,
        generation: Some(generation),
        chipset: Some(name.split_once(' ').map_or(name, |(_, chip)| chip).to_string()),
        memory_gb: Some(memory),
        boost_clock_mhz: Some(boost),
        tdp_w: None,
    }
}

pub fn ram(name: &str, tier: u8, generation: u32, modules: &str, speed: &str) -> Ram {
    Ram {
        name: name.to_string(),
        tier,
        generation: Some(generation),
        modules: Some(modules.to_string()),
        speed: Some(speed.to_string()),
        cas_latency: Some(36),
    }
}

pub fn cpus() -> Vec<Cpu> {
    vec![
        cpu("AMD Ryzen 5 3600", 2, 3, "AM4", 6, 4.2, "DDR4"),
        cpu("Intel Core i3-12100F", 2, 12, "LGA1700", 4, 4.3, "DDR4, DDR5"),
        cpu("AMD Ryzen 5 5600X", 3, 4, "AM4", 6, 4.6, "DDR4"),
        cpu("Intel Core i5-12400F", 3, 12, "LGA1700", 6, 4.4, "DDR4, DDR5"),
        cpu("AMD Ryzen 7 5800X3D", 4, 4, "AM4", 8, 4.5, "DDR4"),
        cpu("AMD Ryzen 7 7700X", 4, 5, "AM5", 8, 5.4, "DDR5"),
        cpu("Intel Core i7-13700K", 5, 13, "LGA1700", 16, 5.4, "DDR4, DDR5"),
        cpu("AMD Ryzen 9 7950X", 6, 5, "AM5", 16, 5.7, "DDR5"),
        cpu("AMD Ryzen 9 9950X", 7, 6, "AM5", 16, 5.7, "DDR5"),
    ]
}

pub fn gpus() -> Vec<Gpu> {
    vec![
        gpu("MSI GeForce GTX 1650", 1, 1, 4.0, 1665.0),
        gpu("ASUS GeForce RTX 3060", 3, 2, 12.0, 1777.0),
        gpu("Sapphire Radeon RX 6700 XT", 4, 2, 12.0, 2581.0),
        gpu("Gigabyte GeForce RTX 4070", 5, 3, 12.0, 2475.0),
        gpu("MSI GeForce RTX 4080", 6, 3, 16.0, 2505.0),
        gpu("ASUS GeForce RTX 4090", 7, 3, 24.0, 2520.0),
    ]
}

pub fn rams() -> Vec<Ram> {
    vec![
        ram("Corsair Vengeance LPX 16 GB", 2, 8, "2,8", "4,3200"),
        ram("G.Skill Ripjaws V 32 GB", 3, 8, "2,16", "4,3600"),
        ram("Kingston Fury Beast 32 GB", 4, 12, "2,16", "5,5600"),
        ram("G.Skill Trident Z5 32 GB", 5, 12, "2,16", "5,6000"),
        ram("G.Skill Trident Z5 32 GB", 5, 12, "2,16", "5,6400"),
        ram("Corsair Dominator 64 GB", 6, 12, "2,32", "5,6400"),
    ]
}

pub fn power() -> PowerTable {
    let mut profiles = Vec::new();
    for cpu_tier in 1..=7u8 {
        for gpu_tier in 1..=7u8 {
            profiles.push(PowerProfile {
                cpu_tier,
                gpu_tier,
                recommended_psu: 350 + 50 * u32::from(cpu_tier) + 100 * u32::from(gpu_tier),
            });
        }
    }
    PowerTable::new(profiles)
}

pub fn catalogs() -> Catalogs {
    Catalogs::new(cpus(), gpus(), rams(), power()).expect("fixture catalogs are non-empty")
}
